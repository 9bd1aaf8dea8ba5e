//! HTTP client for the scan service and image loading.

use futures::channel::oneshot;
use gloo_net::http::{Request, Response};
use scanview_core::{ApiError, ApiResponse, DeviceInfo, ScanRequest, ScanResult, ViewerError};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

pub const DEVICES_URL: &str = "/api/devices";
pub const SCAN_URL: &str = "/api/scan";
pub const ATTACHMENTS_URL: &str = "/api/attachments";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error, status {0}")]
    Http(u16),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Image failed to load: {0}")]
    ImageLoad(String),

    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ClientError::Decode(e.to_string()),
            other => ClientError::Network(other.to_string()),
        }
    }
}

async fn read_envelope<T: DeserializeOwned>(resp: Response) -> Result<ApiResponse<T>, ClientError> {
    if !resp.ok() {
        return Err(ClientError::Http(resp.status()));
    }
    Ok(resp.json::<ApiResponse<T>>().await?)
}

/// List the scanners attached to the service host.
pub async fn fetch_devices() -> Result<Vec<DeviceInfo>, ClientError> {
    let resp = Request::get(DEVICES_URL).send().await?;
    let envelope = read_envelope::<Vec<DeviceInfo>>(resp).await?;

    match envelope.into_result() {
        // The service sends no payload when nothing is plugged in
        Err(ApiError::MissingData) => Ok(Vec::new()),
        other => Ok(other?),
    }
}

/// Run a scan. Resolves once the scanner has finished and the image is stored.
pub async fn request_scan(request: &ScanRequest) -> Result<ScanResult, ClientError> {
    let resp = Request::post(SCAN_URL).json(request)?.send().await?;
    Ok(read_envelope::<ScanResult>(resp).await?.into_result()?)
}

/// Delete every stored scan on the service host.
pub async fn clear_attachments() -> Result<(), ClientError> {
    let resp = Request::delete(ATTACHMENTS_URL).send().await?;
    Ok(read_envelope::<serde_json::Value>(resp).await?.into_unit()?)
}

/// Load an image element from `url`, resolving once it has decoded.
pub async fn load_image(url: &str) -> Result<HtmlImageElement, ClientError> {
    let image = HtmlImageElement::new().map_err(|e| ClientError::ImageLoad(format!("{e:?}")))?;
    image.set_cross_origin(Some("anonymous"));

    let (sender, receiver) = oneshot::channel::<bool>();
    let sender = std::rc::Rc::new(std::cell::RefCell::new(Some(sender)));

    let on_load = {
        let sender = sender.clone();
        Closure::once(move || {
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(true);
            }
        })
    };
    let on_error = Closure::once(move || {
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(false);
        }
    });

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(url);

    let loaded = receiver.await.unwrap_or(false);
    image.set_onload(None);
    image.set_onerror(None);

    if loaded && image.natural_width() > 0 && image.natural_height() > 0 {
        Ok(image)
    } else {
        Err(ClientError::ImageLoad(url.to_string()))
    }
}
