use crate::{PixelSize, ViewerError, ViewTransform};

/// Contain-fit transform: the whole image visible, centered on the surface.
///
/// The scale is `min(surface.w / image.w, surface.h / image.h)` so the image
/// touches the surface on at least one axis and is never cropped. The result
/// is not clamped to the zoom bounds.
///
/// Returns an error if either size has a zero dimension.
pub fn compute_fit(surface: PixelSize, image: PixelSize) -> Result<ViewTransform, ViewerError> {
    if surface.is_empty() {
        return Err(ViewerError::InvalidSurface {
            width: surface.width,
            height: surface.height,
        });
    }
    if image.is_empty() {
        return Err(ViewerError::InvalidImage {
            width: image.width,
            height: image.height,
        });
    }

    let scale_x = surface.width as f64 / image.width as f64;
    let scale_y = surface.height as f64 / image.height as f64;

    Ok(ViewTransform::centered(scale_x.min(scale_y)))
}
