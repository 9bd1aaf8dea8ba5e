use crate::rendering::get_2d_context;
use scanview_core::{redraw, PaintSurface, PixelSize, ViewTransform};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

/// [`PaintSurface`] over a canvas 2D context drawing one image element.
pub struct CanvasSurface<'a> {
    ctx: CanvasRenderingContext2d,
    image: &'a HtmlImageElement,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(canvas: &HtmlCanvasElement, image: &'a HtmlImageElement) -> Result<Self, JsValue> {
        Ok(Self {
            ctx: get_2d_context(canvas)?,
            image,
        })
    }
}

impl PaintSurface for CanvasSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, size: PixelSize) -> Result<(), JsValue> {
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
        Ok(())
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn scale(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.scale(x, y)
    }

    fn draw_image(&mut self, x: f64, y: f64, image: PixelSize) -> Result<(), JsValue> {
        self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            self.image,
            x,
            y,
            image.width as f64,
            image.height as f64,
        )
    }
}

/// Paint `image` onto `canvas` under `transform`.
pub fn paint_image(
    canvas: &HtmlCanvasElement,
    image: &HtmlImageElement,
    transform: &ViewTransform,
) -> Result<(), JsValue> {
    let size = PixelSize::new(canvas.width(), canvas.height());
    let natural = PixelSize::new(image.natural_width(), image.natural_height());
    let mut surface = CanvasSurface::new(canvas, image)?;
    redraw(&mut surface, size, transform, natural)
}

/// Blank the whole canvas.
pub fn clear_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let ctx = get_2d_context(canvas)?;
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    Ok(())
}
