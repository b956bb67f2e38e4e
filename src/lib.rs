//! scrollvid renders scrolling videos from tall vector drawings.
//!
//! A fixed-size viewport slides down an SVG at a constant pace. Every position becomes one PNG
//! frame in an output directory (`000000.png`, `000001.png`, ...), which [`encode`] can turn
//! into an MP4.
//!
//! - Build a [`ScrollConfig`]
//! - Pick a [`VectorRasterizer`] ([`Inkscape`] or [`Resvg`])
//! - Run a [`Scroller`]
#![forbid(unsafe_code)]

mod foundation;

/// Frame-sequence to video encoding.
pub mod encode;
/// Vector rasterizer backends.
pub mod raster;
/// Scroll planning and frame export.
pub mod scroll;

pub use crate::foundation::core::{FrameIndex, Point, Rect, Vec2};
pub use crate::foundation::error::{ScrollError, ScrollResult};

pub use crate::encode::ffmpeg::{EncodeOpts, encode_frames};
pub use crate::raster::{
    DimensionQuery, Inkscape, RasterizerKind, Resvg, VectorRasterizer, create_rasterizer,
};
pub use crate::scroll::cache::FrameCache;
pub use crate::scroll::config::{CacheMode, ScrollConfig, ScrollConfigFile};
pub use crate::scroll::export::{AreaSource, export_area};
pub use crate::scroll::scroller::{RenderOpts, RenderReport, RenderState, Scroller};
pub use crate::scroll::sequence::{FrameSequence, GUARD_MARGIN_PX, advance_px_per_frame};
