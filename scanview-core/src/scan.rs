//! Wire types of the scan service HTTP API.
//!
//! Field names follow the service's JSON exactly (PascalCase for most
//! payloads, lower case for the scan request body).

use crate::ApiError;
use serde::{Deserialize, Serialize};

/// Response code the service uses for success.
pub const SUCCESS_CODE: &str = "0";

/// Envelope wrapping every API response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Msg", default)]
    pub message: String,
    #[serde(rename = "Data")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Unwrap the payload, turning a failure code into an error.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Service {
                code: self.code,
                message: self.message,
            });
        }
        self.data.ok_or(ApiError::MissingData)
    }

    /// Like [`into_result`](Self::into_result) for endpoints with no payload.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::Service {
                code: self.code,
                message: self.message,
            })
        }
    }
}

/// USB scanner as reported by the device listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "VendorID")]
    pub vendor_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
}

impl DeviceInfo {
    /// Name for display, with a fallback for devices that report none.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown device"
        } else {
            &self.name
        }
    }

    /// `vendor:product` identifier, e.g. `0x17ef:0x5629`.
    pub fn id_label(&self) -> String {
        format!("{}:{}", self.vendor_id, self.product_id)
    }
}

/// Scan parameters. Geometry is in millimetres.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanOptions {
    #[serde(rename = "DPI")]
    pub dpi: u16,
    #[serde(rename = "Mode")]
    pub mode: String,
    #[serde(rename = "Top")]
    pub top: f64,
    #[serde(rename = "Left")]
    pub left: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
}

pub const DEFAULT_SCAN_MODE: &str = "CGRAY";

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dpi: 400,
            mode: DEFAULT_SCAN_MODE.to_string(),
            top: 0.0,
            left: 0.0,
            width: 211.881,
            height: 355.567,
        }
    }
}

/// Body of `POST /api/scan`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub device: DeviceInfo,
    pub option: ScanOptions,
}

/// Payload of a successful scan: where the image can be fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "FileType", default)]
    pub file_type: String,
}

/// File name for saving an image: the last path segment of its URL.
pub fn download_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "scan-result.jpg",
    }
}
