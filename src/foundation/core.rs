use crate::foundation::error::{ScrollError, ScrollResult};

pub use kurbo::{Point, Vec2};

/// Absolute 0-based output frame index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// File name of this frame inside the output directory (`NNNNNN.png`).
    pub fn file_name(self) -> String {
        format!("{:06}.png", self.0)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Axis-aligned rectangle with a real-valued top-left corner and integer pixel size.
///
/// The horizontal and vertical extents are half-open: `[x1, x2) × [y1, y2)`, so
/// [`Rect::bottom_right`] is the first point *outside* the rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawRect")]
pub struct Rect {
    origin: Point,
    width: u32,
    height: u32,
}

/// Unchecked wire form of [`Rect`]; deserialized values go through [`Rect::new`].
#[derive(serde::Deserialize)]
struct RawRect {
    origin: Point,
    width: u32,
    height: u32,
}

impl TryFrom<RawRect> for Rect {
    type Error = ScrollError;

    fn try_from(raw: RawRect) -> ScrollResult<Self> {
        Rect::new(raw.origin, raw.width, raw.height)
    }
}

impl Rect {
    /// Create a rectangle; `width` and `height` must be non-zero.
    pub fn new(top_left: Point, width: u32, height: u32) -> ScrollResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollError::invalid_config(format!(
                "rect width/height must be > 0, got {width}x{height}"
            )));
        }
        if !top_left.x.is_finite() || !top_left.y.is_finite() {
            return Err(ScrollError::invalid_config("rect origin must be finite"));
        }
        Ok(Self {
            origin: top_left,
            width,
            height,
        })
    }

    /// Rectangle anchored at `(0, 0)`.
    pub fn at_origin(width: u32, height: u32) -> ScrollResult<Self> {
        Self::new(Point::ORIGIN, width, height)
    }

    pub fn top_left(&self) -> Point {
        self.origin
    }

    /// Exclusive bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.origin + Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn x1(&self) -> f64 {
        self.origin.x
    }

    pub fn y1(&self) -> f64 {
        self.origin.y
    }

    pub fn x2(&self) -> f64 {
        self.bottom_right().x
    }

    pub fn y2(&self) -> f64 {
        self.bottom_right().y
    }

    /// Same size, origin moved down by `delta_px`.
    pub fn shifted_down(&self, delta_px: f64) -> Self {
        Self {
            origin: self.origin + Vec2::new(0.0, delta_px),
            ..*self
        }
    }

    /// Top-left corner snapped to the pixel grid (nearest integer, halves away from zero).
    ///
    /// Raster crops and the in-process rasterizer both address pixels through this, so a crop
    /// from a cached full image lines up with a direct render of the same rect.
    pub fn pixel_origin(&self) -> (i64, i64) {
        (self.origin.x.round() as i64, self.origin.y.round() as i64)
    }

    /// `x1:y1:x2:y2` export-area argument on the pixel grid of [`Rect::pixel_origin`].
    pub fn export_area_arg(&self) -> String {
        let (x, y) = self.pixel_origin();
        format!(
            "{x}:{y}:{}:{}",
            x + i64::from(self.width),
            y + i64::from(self.height)
        )
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})..({}, {})",
            self.x1(),
            self.y1(),
            self.x2(),
            self.y2()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
