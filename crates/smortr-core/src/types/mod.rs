//! Core type definitions used across the Smortr workspace.

pub mod id;
pub mod progress;

pub use id::*;
pub use progress::{TransferProgress, UploadProgress};
