use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Rect;
use crate::foundation::error::{ScrollError, ScrollResult};
use crate::scroll::sequence::advance_px_per_frame;

/// How the full drawing is pre-rasterized before per-frame cropping.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Rasterize the vector source again for every frame.
    None,
    /// Rasterize once and keep the decoded pixels in memory.
    #[default]
    Memory,
    /// Rasterize once to a temporary PNG and crop it for every frame.
    Png,
}

impl std::fmt::Display for CacheMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Memory => "memory",
            Self::Png => "png",
        })
    }
}

/// On-disk (JSON) form of a [`ScrollConfig`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollConfigFile {
    pub svg: PathBuf,
    pub outdir: PathBuf,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    pub pace: f64,
    #[serde(default)]
    pub cache: CacheMode,
}

fn default_fps() -> u32 {
    30
}

/// Validated, read-only render configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollConfig {
    svg: PathBuf,
    outdir: PathBuf,
    viewport: Rect,
    fps: u32,
    pace_s: f64,
    cache: CacheMode,
    advance_px: f64,
}

impl ScrollConfig {
    /// Validate settings and derive the per-frame advance.
    pub fn new(
        svg: impl Into<PathBuf>,
        outdir: impl Into<PathBuf>,
        frame_width: u32,
        frame_height: u32,
        fps: u32,
        pace_s: f64,
        cache: CacheMode,
    ) -> ScrollResult<Self> {
        let viewport = Rect::at_origin(frame_width, frame_height)?;
        let advance_px = advance_px_per_frame(frame_height, pace_s, fps)?;
        Ok(Self {
            svg: svg.into(),
            outdir: outdir.into(),
            viewport,
            fps,
            pace_s,
            cache,
            advance_px,
        })
    }

    /// Load a JSON config file. Relative paths inside it resolve against the file's directory.
    pub fn from_path(path: &Path) -> ScrollResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scroll config '{}'", path.display()))?;
        let file: ScrollConfigFile = serde_json::from_str(&text)
            .with_context(|| format!("parse scroll config '{}'", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_file(file, base)
    }

    pub fn from_file(file: ScrollConfigFile, base: &Path) -> ScrollResult<Self> {
        Self::new(
            base.join(file.svg),
            base.join(file.outdir),
            file.frame_width,
            file.frame_height,
            file.fps,
            file.pace,
            file.cache,
        )
    }

    pub fn svg(&self) -> &Path {
        &self.svg
    }

    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Viewport of frame 0.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn pace_s(&self) -> f64 {
        self.pace_s
    }

    pub fn cache(&self) -> CacheMode {
        self.cache
    }

    /// Pixels to shift per frame.
    pub fn advance_px(&self) -> f64 {
        self.advance_px
    }

    /// Same settings with a different cache mode.
    pub fn with_cache(&self, cache: CacheMode) -> Self {
        Self {
            cache,
            ..self.clone()
        }
    }

    /// Same settings writing into another directory.
    pub fn with_outdir(&self, outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            ..self.clone()
        }
    }

    /// Output path of frame `frame`.
    pub fn frame_path(&self, frame: crate::FrameIndex) -> PathBuf {
        self.outdir.join(frame.file_name())
    }
}
