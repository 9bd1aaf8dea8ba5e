use serde::{Deserialize, Serialize};

/// Width and height in pixels (used for both drawing surfaces and bitmaps)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Grow each axis to at least the given minimum.
    pub fn at_least(&self, min: PixelSize) -> PixelSize {
        PixelSize {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// Point in surface pixels, measured from the surface's geometric center.
///
/// Positive x is right, positive y is down. This is the same origin the
/// [`ViewTransform`](crate::ViewTransform) offsets are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    pub const CENTER: SurfacePoint = SurfacePoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert a client-space event position into a center-relative point.
    ///
    /// `rect_left`/`rect_top` are the surface's bounding rect origin in client
    /// space; `surface` is its pixel size.
    pub fn from_client(
        client_x: f64,
        client_y: f64,
        rect_left: f64,
        rect_top: f64,
        surface: PixelSize,
    ) -> Self {
        Self {
            x: client_x - rect_left - surface.half_width(),
            y: client_y - rect_top - surface.half_height(),
        }
    }
}
