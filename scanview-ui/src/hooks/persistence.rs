//! Browser persistence for scan history and scanner settings.
//!
//! Both live in localStorage as JSON. Missing or unreadable entries fall back
//! to defaults so a corrupt store never blocks the page.

use scanview_core::{ScanHistory, ScanRecord, ScannerSettings};
use serde::{de::DeserializeOwned, Serialize};
use web_sys::Storage;

pub const HISTORY_KEY: &str = "scanHistory";
pub const SETTINGS_KEY: &str = "scannerSettings";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

fn load_raw(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = load_raw(key)?;

    match serde_json::from_str::<T>(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to parse localStorage entry {}: {}", key, e);
            None
        }
    }
}

fn save_json<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };

    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = storage.set_item(key, &json) {
                log::warn!("Failed to save {} to localStorage: {:?}", key, e);
            }
        }
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", key, e);
        }
    }
}

/// Decode a stored history, keeping only the newest records.
pub fn decode_history(json: &str) -> Result<ScanHistory, serde_json::Error> {
    let records: Vec<ScanRecord> = serde_json::from_str(json)?;
    Ok(ScanHistory::from_records(records))
}

/// Load the scan history, or an empty one.
pub fn load_history() -> ScanHistory {
    let Some(json) = load_raw(HISTORY_KEY) else {
        return ScanHistory::new();
    };

    match decode_history(&json) {
        Ok(history) => {
            log::info!("Restored {} scans from localStorage", history.len());
            history
        }
        Err(e) => {
            log::warn!("Failed to parse scan history: {}", e);
            ScanHistory::new()
        }
    }
}

pub fn save_history(history: &ScanHistory) {
    save_json(HISTORY_KEY, history);
}

pub fn clear_history() {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Err(e) = storage.remove_item(HISTORY_KEY) {
        log::warn!("Failed to clear scan history: {:?}", e);
    }
}

pub fn load_settings() -> Option<ScannerSettings> {
    load_json(SETTINGS_KEY)
}

pub fn save_settings(settings: &ScannerSettings) {
    save_json(SETTINGS_KEY, settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanview_core::HISTORY_LIMIT;

    fn stored_record(n: usize) -> String {
        format!(
            r#"{{"device":{{"Name":"Lenovo","VendorID":"0x17ef","ProductID":"0x5629"}},
                "options":{{"DPI":400,"Mode":"CGRAY","Top":0,"Left":0,"Width":211.881,"Height":355.567}},
                "filePath":"/api/download/{n}.jpg","timestamp":"18/10/2026, 09:0{n}:00"}}"#
        )
    }

    #[test]
    fn decodes_stored_history_newest_first() {
        let json = format!("[{},{}]", stored_record(2), stored_record(1));
        let history = decode_history(&json).unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.latest().map(|r| r.file_path.as_str()),
            Some("/api/download/2.jpg")
        );
    }

    #[test]
    fn oversized_history_is_truncated() {
        let records: Vec<String> = (0..HISTORY_LIMIT + 3).map(|n| stored_record(n % 10)).collect();
        let json = format!("[{}]", records.join(","));

        assert_eq!(decode_history(&json).unwrap().len(), HISTORY_LIMIT);
    }

    #[test]
    fn corrupt_history_is_an_error() {
        assert!(decode_history("{not json").is_err());
    }

    #[test]
    fn settings_without_options_use_defaults() {
        let settings: ScannerSettings = serde_json::from_str(
            r#"{"device":{"Name":"Lenovo","VendorID":"0x17ef","ProductID":"0x5629"}}"#,
        )
        .unwrap();
        assert_eq!(settings.options.dpi, 400);
        assert_eq!(settings.device.map(|d| d.name), Some("Lenovo".to_string()));
    }
}
