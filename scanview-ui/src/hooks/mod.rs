mod persistence;
mod use_toast;
mod use_viewer;

pub use persistence::{clear_history, load_history, load_settings, save_history, save_settings};
pub use use_toast::{use_toast, ToastMessage};
pub use use_viewer::{use_viewer, LoadedImage, ViewerHandle};
