use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use anyhow::Context as _;

use crate::foundation::core::Rect;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::raster::{DimensionQuery, VectorRasterizer};

/// In-process rasterizer built on `usvg` + `resvg`.
///
/// The export origin is snapped to the pixel grid with [`Rect::pixel_origin`], which makes a
/// direct export pixel-identical to a crop of a full render.
#[derive(Default)]
pub struct Resvg {
    fontdb: OnceLock<Arc<usvg::fontdb::Database>>,
    trees: Mutex<HashMap<PathBuf, Arc<usvg::Tree>>>,
}

impl std::fmt::Debug for Resvg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resvg").finish_non_exhaustive()
    }
}

impl Resvg {
    fn tree(&self, svg: &Path) -> ScrollResult<Arc<usvg::Tree>> {
        let mut trees = self
            .trees
            .lock()
            .map_err(|_| ScrollError::Other(anyhow::anyhow!("svg tree cache lock poisoned")))?;
        if let Some(tree) = trees.get(svg) {
            return Ok(tree.clone());
        }

        let bytes =
            std::fs::read(svg).with_context(|| format!("read svg '{}'", svg.display()))?;
        let fontdb = self
            .fontdb
            .get_or_init(|| {
                let mut db = usvg::fontdb::Database::new();
                db.load_system_fonts();
                Arc::new(db)
            })
            .clone();
        let opts = usvg::Options {
            resources_dir: svg.parent().map(Path::to_path_buf),
            fontdb,
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(&bytes, &opts)
            .with_context(|| format!("parse svg tree '{}'", svg.display()))?;
        let tree = Arc::new(tree);
        trees.insert(svg.to_path_buf(), tree.clone());
        Ok(tree)
    }
}

impl VectorRasterizer for Resvg {
    fn name(&self) -> &'static str {
        "resvg"
    }

    fn export_area(&self, svg: &Path, rect: &Rect, out: &Path) -> ScrollResult<()> {
        let tree = self.tree(svg)?;
        let frame = render_area(&tree, rect)?;
        frame
            .save_with_format(out, image::ImageFormat::Png)
            .with_context(|| {
                format!(
                    "export {rect} of '{}' to '{}'",
                    svg.display(),
                    out.display()
                )
            })?;
        Ok(())
    }

    fn query(&self, svg: &Path, query: DimensionQuery) -> ScrollResult<f64> {
        let tree = self.tree(svg)?;
        let bbox = tree.root().abs_stroke_bounding_box();
        let v = match query {
            DimensionQuery::LeftX => bbox.x(),
            DimensionQuery::TopY => bbox.y(),
            DimensionQuery::Width => bbox.width(),
            DimensionQuery::Height => bbox.height(),
        };
        if !v.is_finite() {
            return Err(ScrollError::dimension_query(format!(
                "{query:?} of '{}' is not finite",
                svg.display()
            )));
        }
        Ok(f64::from(v))
    }
}

/// Render `rect` of `tree` into straight-alpha RGBA8.
pub(crate) fn render_area(tree: &usvg::Tree, rect: &Rect) -> ScrollResult<image::RgbaImage> {
    let (width, height) = (rect.width(), rect.height());
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        ScrollError::invalid_config(format!("failed to allocate {width}x{height} pixmap"))
    })?;

    let (x, y) = rect.pixel_origin();
    let xform = resvg::tiny_skia::Transform::from_translate(-(x as f32), -(y as f32));
    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| ScrollError::Other(anyhow::anyhow!("rendered buffer size mismatch")))
}
