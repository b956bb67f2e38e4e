use crate::foundation::core::{FrameIndex, Rect};
use crate::foundation::error::{ScrollError, ScrollResult};

/// Extra rows added below the last frame when pre-rasterizing the full drawing.
pub const GUARD_MARGIN_PX: u32 = 1;

/// Pixels the viewport moves down between two consecutive frames.
///
/// `height_px` is the viewport height; `pace_s` is the number of seconds needed to scroll one
/// full viewport.
pub fn advance_px_per_frame(height_px: u32, pace_s: f64, fps: u32) -> ScrollResult<f64> {
    if !pace_s.is_finite() || pace_s <= 0.0 {
        return Err(ScrollError::invalid_config(format!(
            "pace must be a positive number of seconds, got {pace_s}"
        )));
    }
    if fps == 0 {
        return Err(ScrollError::invalid_config("fps must be > 0"));
    }
    let shift_px_per_sec = f64::from(height_px) / pace_s;
    Ok(shift_px_per_sec / f64::from(fps))
}

/// The ordered, finite set of viewport rectangles of one scroll.
///
/// Frames are computed on demand from the origin viewport; there is no iteration state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSequence {
    origin: Rect,
    drawing_height_px: f64,
    advance_px: f64,
    frame_count: u64,
}

impl FrameSequence {
    /// `drawing_height_px` is the effective drawing height, including any empty space above
    /// the first visible content.
    pub fn new(origin: Rect, drawing_height_px: f64, advance_px: f64) -> ScrollResult<Self> {
        if origin.x1() != 0.0 || origin.y1() != 0.0 {
            return Err(ScrollError::invalid_config(format!(
                "frame sequence viewport must start at the origin, got {origin}"
            )));
        }
        if !advance_px.is_finite() || advance_px <= 0.0 {
            return Err(ScrollError::invalid_config(format!(
                "advance must be > 0 px per frame, got {advance_px}"
            )));
        }
        if !drawing_height_px.is_finite() || drawing_height_px < 0.0 {
            return Err(ScrollError::invalid_config(format!(
                "drawing height must be >= 0, got {drawing_height_px}"
            )));
        }

        // One frame beyond the last one that still touches content: the final frame shows only
        // the empty space below the drawing.
        let frame_count = (drawing_height_px / advance_px).ceil() as u64 + 1;
        Ok(Self {
            origin,
            drawing_height_px,
            advance_px,
            frame_count,
        })
    }

    pub fn estimated_frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn advance_px(&self) -> f64 {
        self.advance_px
    }

    pub fn drawing_height_px(&self) -> f64 {
        self.drawing_height_px
    }

    /// Viewport of frame `frame`.
    pub fn frame_rect(&self, frame: FrameIndex) -> ScrollResult<Rect> {
        if frame.0 >= self.frame_count {
            return Err(ScrollError::invalid_config(format!(
                "frame {frame} is out of range (sequence has {} frames)",
                self.frame_count
            )));
        }
        Ok(self.rect_unchecked(frame))
    }

    pub fn last_frame_rect(&self) -> Rect {
        self.rect_unchecked(FrameIndex(self.frame_count - 1))
    }

    /// Full-width rectangle covering every frame plus [`GUARD_MARGIN_PX`].
    ///
    /// A cache rasterized with this size can serve every [`FrameSequence::frame_rect`].
    pub fn cover_rect(&self) -> ScrollResult<Rect> {
        let bottom = self.last_frame_rect().y2().ceil();
        let height = u32::try_from(bottom as u64 + u64::from(GUARD_MARGIN_PX)).map_err(|_| {
            ScrollError::invalid_config(format!("full drawing height {bottom} px is too large"))
        })?;
        Rect::at_origin(self.origin.width(), height)
    }

    /// All frames in order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, Rect)> + '_ {
        (0..self.frame_count).map(|f| (FrameIndex(f), self.rect_unchecked(FrameIndex(f))))
    }

    fn rect_unchecked(&self, frame: FrameIndex) -> Rect {
        self.origin.shifted_down(frame.0 as f64 * self.advance_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/sequence.rs"]
mod tests;
