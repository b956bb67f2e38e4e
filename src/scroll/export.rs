use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Rect;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::raster::VectorRasterizer;

/// Where frame pixels come from. Chosen explicitly by the cache orchestrator.
#[derive(Debug)]
pub enum AreaSource {
    /// The original vector file; every export goes through the rasterizer.
    Vector(PathBuf),
    /// A pre-rasterized full drawing on disk.
    RasterFile(PathBuf),
    /// A pre-rasterized full drawing already decoded into memory.
    Buffer(image::RgbaImage),
}

impl AreaSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Vector(_) => "vector",
            Self::RasterFile(_) => "raster-file",
            Self::Buffer(_) => "buffer",
        }
    }
}

/// Write the pixels of `rect` from `source` to the PNG at `out`.
///
/// Exactly one file is written on success. On failure nothing is left at `out`.
pub fn export_area(
    rect: &Rect,
    source: &AreaSource,
    out: &Path,
    rasterizer: &dyn VectorRasterizer,
) -> ScrollResult<()> {
    let res = match source {
        AreaSource::Vector(svg) => rasterizer.export_area(svg, rect, out),
        AreaSource::RasterFile(path) => {
            let full = image::open(path)
                .with_context(|| format!("decode cached raster '{}'", path.display()))?
                .to_rgba8();
            save_crop(&full, rect, out)
        }
        AreaSource::Buffer(full) => save_crop(full, rect, out),
    };
    if res.is_err() {
        let _ = std::fs::remove_file(out);
    }
    res
}

fn save_crop(full: &image::RgbaImage, rect: &Rect, out: &Path) -> ScrollResult<()> {
    let frame = crop(full, rect)?;
    frame
        .save_with_format(out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

/// Crop the half-open pixel rows/columns of `rect` out of `full`.
pub(crate) fn crop(full: &image::RgbaImage, rect: &Rect) -> ScrollResult<image::RgbaImage> {
    let (x, y) = rect.pixel_origin();
    let (w, h) = (rect.width(), rect.height());
    let (full_w, full_h) = full.dimensions();

    let fits = x >= 0
        && y >= 0
        && x + i64::from(w) <= i64::from(full_w)
        && y + i64::from(h) <= i64::from(full_h);
    if !fits {
        return Err(ScrollError::invalid_config(format!(
            "frame {rect} lies outside the cached {full_w}x{full_h} raster"
        )));
    }

    let frame = image::imageops::crop_imm(full, x as u32, y as u32, w, h).to_image();
    debug_assert_eq!(frame.dimensions(), (w, h));
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/export.rs"]
mod tests;
