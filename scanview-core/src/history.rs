//! Recent scans and last-used scanner settings.

use crate::{DeviceInfo, ScanOptions};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of scans kept in the history.
pub const HISTORY_LIMIT: usize = 10;

/// One completed scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub device: DeviceInfo,
    pub options: ScanOptions,
    /// Image URL returned by the scan service
    pub file_path: String,
    /// Local time of the scan, preformatted for display
    pub timestamp: String,
}

impl ScanRecord {
    /// Scan area label, e.g. `211.881×355.567mm`.
    pub fn area_label(&self) -> String {
        format!("{}×{}mm", self.options.width, self.options.height)
    }
}

/// Scan history, newest first, capped at [`HISTORY_LIMIT`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanHistory {
    records: VecDeque<ScanRecord>,
}

impl ScanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored records, keeping only the newest [`HISTORY_LIMIT`].
    pub fn from_records(records: impl IntoIterator<Item = ScanRecord>) -> Self {
        Self {
            records: records.into_iter().take(HISTORY_LIMIT).collect(),
        }
    }

    /// Add a scan at the front, dropping the oldest one past the limit.
    pub fn push(&mut self, record: ScanRecord) {
        self.records.push_front(record);
        self.records.truncate(HISTORY_LIMIT);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&ScanRecord> {
        self.records.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScanRecord> {
        self.records.iter()
    }
}

/// Device and options used for the last scan, restored on the next visit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerSettings {
    pub device: Option<DeviceInfo>,
    #[serde(default)]
    pub options: ScanOptions,
}
