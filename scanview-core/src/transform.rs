use crate::SurfacePoint;
use serde::{Deserialize, Serialize};

/// Scale and translation mapping image-local coordinates onto the surface.
///
/// Image-local coordinates have their origin at the image's geometric center.
/// Surface coordinates are [`SurfacePoint`]s (origin at the surface center).
/// The forward map is `surface = image * scale + offset`, which is exactly what
/// the renderer paints: translate to `center + offset`, scale, draw centered.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    /// Horizontal offset of the image center from the surface center, in pixels
    pub offset_x: f64,
    /// Vertical offset of the image center from the surface center, in pixels
    pub offset_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::centered(1.0)
    }
}

impl ViewTransform {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Transform with the image centered on the surface.
    pub fn centered(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0)
    }

    pub fn offset(&self) -> SurfacePoint {
        SurfacePoint::new(self.offset_x, self.offset_y)
    }

    /// Map an image-local point to the surface.
    pub fn image_to_surface(&self, image_x: f64, image_y: f64) -> SurfacePoint {
        SurfacePoint::new(
            image_x * self.scale + self.offset_x,
            image_y * self.scale + self.offset_y,
        )
    }

    /// Map a surface point back into image-local space.
    pub fn surface_to_image(&self, point: SurfacePoint) -> (f64, f64) {
        (
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }

    /// Rescale so the image point under `anchor` stays under `anchor`.
    pub fn zoomed_at(&self, anchor: SurfacePoint, new_scale: f64) -> ViewTransform {
        let (image_x, image_y) = self.surface_to_image(anchor);
        ViewTransform {
            scale: new_scale,
            offset_x: anchor.x - image_x * new_scale,
            offset_y: anchor.y - image_y * new_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn forward_and_inverse_agree() {
        let t = ViewTransform::new(0.75, 12.0, -40.0);
        let p = t.image_to_surface(100.0, -30.0);
        let (x, y) = t.surface_to_image(p);

        assert!((x - 100.0).abs() < EPS);
        assert!((y + 30.0).abs() < EPS);
    }

    #[test]
    fn image_center_lands_on_offset() {
        let t = ViewTransform::new(2.0, 50.0, 30.0);
        assert_eq!(t.image_to_surface(0.0, 0.0), t.offset());
    }

    #[test]
    fn zoomed_at_keeps_anchor_fixed() {
        let t = ViewTransform::new(0.5, -20.0, 35.0);
        let anchor = SurfacePoint::new(130.0, -75.0);
        let before = t.surface_to_image(anchor);

        let zoomed = t.zoomed_at(anchor, 1.7);
        let after = zoomed.surface_to_image(anchor);

        assert_eq!(zoomed.scale, 1.7);
        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
    }

    #[test]
    fn zoomed_at_surface_center_with_centered_image_stays_centered() {
        let t = ViewTransform::centered(0.5);
        let zoomed = t.zoomed_at(SurfacePoint::CENTER, 0.55);

        assert_eq!(zoomed.offset_x, 0.0);
        assert_eq!(zoomed.offset_y, 0.0);
    }
}
