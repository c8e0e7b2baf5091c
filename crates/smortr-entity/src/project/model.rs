//! Project records held by the project index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use smortr_core::types::ProjectId;

/// A created project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Server-assigned identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Account that created the project.
    pub creator_id: String,
    /// Contact email of the creator.
    pub source_email: String,
    /// Domain part of `source_email`.
    pub source_domain: String,
    /// Cover image reference.
    pub image_url: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRecord {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Account that creates the project.
    pub creator_id: String,
    /// Contact email of the creator.
    pub source_email: String,
    /// Domain part of `source_email`.
    pub source_domain: String,
    /// Cover image reference.
    pub image_url: String,
}

/// Changes to an existing project record. `None` fields are left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProjectRecord {
    /// New project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New project description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New cover image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UpdateProjectRecord {
    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image_url.is_none()
    }

    /// Apply the changes to `project`.
    pub fn apply_to(&self, project: &mut ProjectRecord) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            project.image_url = image_url.clone();
        }
    }
}
