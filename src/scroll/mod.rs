//! Scroll planning and frame export.
//!
//! [`sequence`] turns a drawing height and viewport into frame rectangles, [`cache`] prepares
//! the pixels those rectangles are cut from, [`export`] writes one frame, and [`scroller`]
//! drives a whole run.

pub mod cache;
pub mod config;
pub mod export;
pub mod scroller;
pub mod sequence;
