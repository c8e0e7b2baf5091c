//! File metadata records held by the project index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smortr_core::types::{FileRecordId, ProjectId};

/// Metadata of a file attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Record identifier.
    pub id: FileRecordId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Account that uploaded the file.
    pub creator_id: String,
    /// Original display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Storage path of the object.
    pub path: String,
    /// Public URL of the object.
    pub url: String,
    /// When the record was registered.
    pub created_at: DateTime<Utc>,
}

/// Data required to register a file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Owning project.
    pub project_id: ProjectId,
    /// Account that uploaded the file.
    pub creator_id: String,
    /// Original display name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Storage path of the object.
    pub path: String,
    /// Public URL of the object.
    pub url: String,
}
