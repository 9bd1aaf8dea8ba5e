mod canvas_renderer;
mod canvas_utils;

pub use canvas_renderer::{clear_canvas, paint_image};
pub use canvas_utils::{client_to_surface, get_2d_context, resize_canvas};
