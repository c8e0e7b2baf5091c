//! Byte-level transfer progress.

use serde::{Deserialize, Serialize};

/// Raw progress event emitted by a storage transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferProgress {
    /// Bytes transferred so far.
    pub loaded: u64,
    /// Total bytes of the transfer.
    pub total: u64,
}

impl TransferProgress {
    /// Percentage of the transfer completed, `loaded / total * 100`.
    ///
    /// An empty transfer counts as complete.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.loaded as f64 / self.total as f64 * 100.0
    }
}

/// Per-file progress reported to the caller of a project submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadProgress {
    /// Display name of the file being uploaded.
    pub file_name: String,
    /// Completion percentage in `0.0..=100.0`.
    pub percent_complete: f64,
}
