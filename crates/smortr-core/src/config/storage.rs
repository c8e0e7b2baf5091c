//! Object storage and project index configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all runtime data (objects and index files).
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Bucket that receives project files.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Base URL that public object URLs are derived from.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Write granularity in bytes; one progress event is emitted per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: u64,
    /// Cache lifetime advertised for uploaded objects.
    #[serde(default = "default_cache_control")]
    pub cache_control_seconds: u64,
    /// Whether an upload may overwrite an existing object.
    #[serde(default)]
    pub upsert: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            bucket: default_bucket(),
            public_base_url: default_public_base_url(),
            chunk_size_bytes: default_chunk_size(),
            cache_control_seconds: default_cache_control(),
            upsert: false,
        }
    }
}

fn default_data_root() -> String {
    "./data".to_string()
}

fn default_bucket() -> String {
    "project-files".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:54321/storage/v1/object/public".to_string()
}

fn default_chunk_size() -> u64 {
    65_536 // 64 KB
}

fn default_cache_control() -> u64 {
    3600
}
