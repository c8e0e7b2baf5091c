//! Project index: project records and file metadata records.

pub mod json;

use async_trait::async_trait;

use smortr_core::result::AppResult;
use smortr_core::types::ProjectId;
use smortr_entity::file::{CreateFileRecord, FileRecord};
use smortr_entity::project::{CreateProjectRecord, ProjectRecord, UpdateProjectRecord};

pub use json::JsonProjectIndex;

/// Trait for the remote index that holds project and file records.
#[async_trait]
pub trait ProjectIndex: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a project record, returning it with its assigned id.
    async fn create_project(&self, record: &CreateProjectRecord) -> AppResult<ProjectRecord>;

    /// Find a project by id.
    async fn find_project(&self, id: ProjectId) -> AppResult<Option<ProjectRecord>>;

    /// Apply `changes` to a project. Returns `None` if it does not exist.
    async fn update_project(
        &self,
        id: ProjectId,
        changes: &UpdateProjectRecord,
    ) -> AppResult<Option<ProjectRecord>>;

    /// All projects, newest first.
    async fn list_projects(&self) -> AppResult<Vec<ProjectRecord>>;

    /// Register metadata for an uploaded file.
    async fn register_file(&self, record: &CreateFileRecord) -> AppResult<FileRecord>;

    /// File records of a project, newest first.
    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<FileRecord>>;

    /// Delete the file record stored at `path`. Returns `true` if deleted.
    async fn delete_file(&self, path: &str) -> AppResult<bool>;

    /// Delete a project and its file records. Returns `true` if deleted.
    async fn delete_project(&self, id: ProjectId) -> AppResult<bool>;
}
