//! Vector rasterizer backends.
//!
//! A [`VectorRasterizer`] turns a rectangle of an SVG drawing into a PNG and answers scalar
//! queries about the drawing's extent. [`Inkscape`] drives the external `inkscape` binary;
//! [`Resvg`] renders in-process.

use std::path::Path;

use crate::foundation::core::Rect;
use crate::foundation::error::ScrollResult;

mod in_process;
mod inkscape;

pub use in_process::Resvg;
pub use inkscape::Inkscape;

/// Scalar drawing measurements, in px. These describe the drawing, not the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DimensionQuery {
    /// X of the drawing's top-left corner.
    LeftX,
    /// Y of the drawing's top-left corner.
    TopY,
    Width,
    Height,
}

impl DimensionQuery {
    pub(crate) fn inkscape_flag(self) -> &'static str {
        match self {
            Self::LeftX => "--query-x",
            Self::TopY => "--query-y",
            Self::Width => "--query-width",
            Self::Height => "--query-height",
        }
    }
}

/// Rasterizer contract shared by every backend.
///
/// Implementations must be shareable across export workers.
pub trait VectorRasterizer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Rasterize exactly `rect` of `svg` into a `rect.width() x rect.height()` PNG at `out`.
    fn export_area(&self, svg: &Path, rect: &Rect, out: &Path) -> ScrollResult<()>;

    /// Measure the drawing.
    fn query(&self, svg: &Path, query: DimensionQuery) -> ScrollResult<f64>;

    /// Effective drawing height: the free space above the drawing plus the drawing itself,
    /// rounded up to whole pixels.
    fn drawing_height(&self, svg: &Path) -> ScrollResult<f64> {
        let top = self.query(svg, DimensionQuery::TopY)?;
        let height = self.query(svg, DimensionQuery::Height)?;
        Ok((top + height).ceil())
    }
}

/// Rasterizer selection, as exposed on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterizerKind {
    #[default]
    Inkscape,
    Resvg,
}

/// Build the rasterizer for `kind` with default settings.
pub fn create_rasterizer(kind: RasterizerKind) -> Box<dyn VectorRasterizer> {
    match kind {
        RasterizerKind::Inkscape => Box::new(Inkscape::default()),
        RasterizerKind::Resvg => Box::new(Resvg::default()),
    }
}
