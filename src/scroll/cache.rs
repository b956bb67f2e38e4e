use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::foundation::core::Rect;
use crate::foundation::error::ScrollResult;
use crate::raster::VectorRasterizer;
use crate::scroll::config::CacheMode;
use crate::scroll::export::AreaSource;

const FULL_IMAGE_NAME: &str = "full.png";

/// Temporary directory removed on drop.
#[derive(Debug)]
pub struct ScratchDir(Option<PathBuf>);

impl ScratchDir {
    /// Create a fresh, uniquely named directory under the system temp dir.
    pub fn new(prefix: &str) -> ScrollResult<Self> {
        static SEQ: AtomicU64 = AtomicU64::new(0);
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let name = format!(
            "{prefix}-{}-{nanos}-{}",
            std::process::id(),
            SEQ.fetch_add(1, Ordering::Relaxed)
        );
        let path = std::env::temp_dir().join(name);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("create scratch dir '{}'", path.display()))?;
        Ok(Self(Some(path)))
    }

    pub fn path(&self) -> &Path {
        self.0.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_dir_all(path);
        }
    }
}

/// The frame source of one render run, plus whatever temporary storage backs it.
///
/// Read-only once built; dropping it releases the temporary storage.
#[derive(Debug)]
pub struct FrameCache {
    mode: CacheMode,
    source: AreaSource,
    // Keeps the raster file alive for `CacheMode::Png`.
    scratch: Option<ScratchDir>,
}

impl FrameCache {
    /// Prepare the source for `mode`.
    ///
    /// For the caching modes `cover` must contain every frame rect that will be requested;
    /// it is rasterized exactly once.
    #[tracing::instrument(skip_all, fields(mode = %mode, svg = %svg.display(), cover = %cover))]
    pub fn build(
        mode: CacheMode,
        svg: &Path,
        cover: &Rect,
        rasterizer: &dyn VectorRasterizer,
    ) -> ScrollResult<Self> {
        match mode {
            CacheMode::None => Ok(Self {
                mode,
                source: AreaSource::Vector(svg.to_path_buf()),
                scratch: None,
            }),
            CacheMode::Png => {
                let (scratch, full) = rasterize_full(svg, cover, rasterizer)?;
                Ok(Self {
                    mode,
                    source: AreaSource::RasterFile(full),
                    scratch: Some(scratch),
                })
            }
            CacheMode::Memory => {
                let (_scratch, full) = rasterize_full(svg, cover, rasterizer)?;
                let buf = image::open(&full)
                    .with_context(|| format!("decode full raster '{}'", full.display()))?
                    .to_rgba8();
                // The decoded pixels are all we need; the scratch dir goes away here.
                Ok(Self {
                    mode,
                    source: AreaSource::Buffer(buf),
                    scratch: None,
                })
            }
        }
    }

    pub fn mode(&self) -> CacheMode {
        self.mode
    }

    pub fn source(&self) -> &AreaSource {
        &self.source
    }

    /// Directory holding temporary cache files, if any.
    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch.as_ref().map(ScratchDir::path)
    }
}

/// Rasterize `cover` of `svg` once into a fresh scratch dir.
fn rasterize_full(
    svg: &Path,
    cover: &Rect,
    rasterizer: &dyn VectorRasterizer,
) -> ScrollResult<(ScratchDir, PathBuf)> {
    let scratch = ScratchDir::new("scrollvid-cache")?;
    let full = scratch.path().join(FULL_IMAGE_NAME);
    tracing::info!(
        width = cover.width(),
        height = cover.height(),
        "rasterizing full drawing once"
    );
    rasterizer.export_area(svg, cover, &full)?;
    Ok((scratch, full))
}
