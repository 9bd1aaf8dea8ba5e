use crate::{PixelSize, ViewTransform};

/// Drawing operations the viewer needs from a 2D surface.
///
/// Implemented over a canvas 2D context in the browser. `save`/`restore`
/// bracket the transformed draw so the surface transform does not accumulate
/// across redraws.
pub trait PaintSurface {
    type Error;

    fn clear(&mut self, size: PixelSize) -> Result<(), Self::Error>;
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    fn scale(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;
    /// Draw the image with its top-left corner at `(x, y)` in current coordinates.
    fn draw_image(&mut self, x: f64, y: f64, image: PixelSize) -> Result<(), Self::Error>;
}

/// Repaint the surface: clear, move the origin to the surface center plus
/// offset, scale, then draw the image centered on that origin.
///
/// This is the forward map of [`ViewTransform::image_to_surface`].
pub fn redraw<S: PaintSurface>(
    surface: &mut S,
    size: PixelSize,
    transform: &ViewTransform,
    image: PixelSize,
) -> Result<(), S::Error> {
    surface.clear(size)?;
    surface.save();
    let result = draw_transformed(surface, size, transform, image);
    surface.restore();
    result
}

fn draw_transformed<S: PaintSurface>(
    surface: &mut S,
    size: PixelSize,
    transform: &ViewTransform,
    image: PixelSize,
) -> Result<(), S::Error> {
    surface.translate(
        size.half_width() + transform.offset_x,
        size.half_height() + transform.offset_y,
    )?;
    surface.scale(transform.scale, transform.scale)?;
    surface.draw_image(-image.half_width(), -image.half_height(), image)
}
