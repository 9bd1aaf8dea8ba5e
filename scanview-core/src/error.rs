//! Viewer and service error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("Surface must have positive dimensions, got {width}x{height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("Image must have positive dimensions, got {width}x{height}")]
    InvalidImage { width: u32, height: u32 },

    #[error("No image loaded")]
    NoImage,

    #[error("Invalid viewer config: {0}")]
    InvalidConfig(String),
}

/// Failure reported inside a scan service response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Service error {code}: {message}")]
    Service { code: String, message: String },

    #[error("Response is missing its data payload")]
    MissingData,
}
