mod device_list;
mod history_panel;
mod scan_form;
mod toast;
mod viewer_canvas;
mod viewer_toolbar;

pub use device_list::DeviceList;
pub use history_panel::HistoryPanel;
pub use scan_form::ScanForm;
pub use toast::Toast;
pub use viewer_canvas::ViewerCanvas;
pub use viewer_toolbar::ViewerToolbar;
