//! Turning a directory of frames into a video.

/// `ffmpeg`-based image-sequence encoding.
pub mod ffmpeg;
