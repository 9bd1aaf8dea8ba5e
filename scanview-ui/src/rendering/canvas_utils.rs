use scanview_core::{PixelSize, SurfacePoint};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Get 2D rendering context from canvas.
pub fn get_2d_context(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    Ok(canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("No 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()?)
}

/// Resize the canvas backing store. Returns true if the size changed.
///
/// Setting either dimension clears the canvas, so callers must repaint.
pub fn resize_canvas(canvas: &HtmlCanvasElement, size: PixelSize) -> bool {
    if canvas.width() == size.width && canvas.height() == size.height {
        return false;
    }
    canvas.set_width(size.width);
    canvas.set_height(size.height);
    true
}

/// Center-relative surface point of a client-space event position.
pub fn client_to_surface(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> SurfacePoint {
    let rect = canvas.get_bounding_client_rect();
    let size = PixelSize::new(canvas.width(), canvas.height());
    SurfacePoint::from_client(client_x, client_y, rect.left(), rect.top(), size)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn resize_reports_changes_only() {
        let canvas = canvas();
        assert!(resize_canvas(&canvas, PixelSize::new(600, 400)));
        assert!(!resize_canvas(&canvas, PixelSize::new(600, 400)));
        assert_eq!((canvas.width(), canvas.height()), (600, 400));
    }

    #[wasm_bindgen_test]
    fn canvas_center_maps_to_origin() {
        let canvas = canvas();
        resize_canvas(&canvas, PixelSize::new(600, 400));
        let rect = canvas.get_bounding_client_rect();

        let p = client_to_surface(&canvas, rect.left() + 300.0, rect.top() + 200.0);
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn context_is_available() {
        assert!(get_2d_context(&canvas()).is_ok());
    }
}
