pub mod config;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod progress;
pub mod render;
pub mod scan;
pub mod session;
pub mod store;
pub mod transform;

pub use config::{ResizePolicy, ViewerConfig, ZoomDirection, SCALE_MAX, SCALE_MIN, ZOOM_FACTOR};
pub use error::{ApiError, ViewerError};
pub use fit::compute_fit;
pub use geometry::{PixelSize, SurfacePoint};
pub use gesture::{
    transition, zoom_step_at, GestureController, GestureEvent, Redraw, TouchContacts, Transition,
};
pub use history::{ScanHistory, ScanRecord, ScannerSettings, HISTORY_LIMIT};
pub use progress::{ScanPhase, ScanProgress};
pub use render::{redraw, PaintSurface};
pub use scan::{
    download_file_name, ApiResponse, DeviceInfo, ScanOptions, ScanRequest, ScanResult,
};
pub use session::ViewerSession;
pub use store::{DragAnchor, GestureState, ViewportSnapshot, ViewportStateStore, ViewportUpdate};
pub use transform::ViewTransform;
