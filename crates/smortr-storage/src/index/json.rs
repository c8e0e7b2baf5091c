//! Project index persisted as a single JSON document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use smortr_core::error::{AppError, ErrorKind};
use smortr_core::result::AppResult;
use smortr_core::types::{FileRecordId, ProjectId};
use smortr_entity::file::{CreateFileRecord, FileRecord};
use smortr_entity::project::{CreateProjectRecord, ProjectRecord, UpdateProjectRecord};

use super::ProjectIndex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct IndexDocument {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
    #[serde(default)]
    files: Vec<FileRecord>,
}

/// Project index stored at `<data_root>/index.json`.
///
/// Every mutation rewrites the document through a temporary file. The
/// in-memory copy only changes once the new document is on disk.
#[derive(Debug)]
pub struct JsonProjectIndex {
    path: PathBuf,
    doc: Mutex<IndexDocument>,
}

impl JsonProjectIndex {
    /// Open the index under `data_root`, starting empty if it does not exist.
    pub async fn open(data_root: &str) -> AppResult<Self> {
        let path = Path::new(data_root).join("index.json");
        let doc = match fs::read(&path).await {
            Ok(raw) => serde_json::from_slice(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => IndexDocument::default(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to read index: {}", path.display()),
                    e,
                ));
            }
        };
        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    async fn persist(&self, doc: &IndexDocument) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to write index", e)
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to replace index", e)
        })?;
        Ok(())
    }
}

#[async_trait]
impl ProjectIndex for JsonProjectIndex {
    async fn create_project(&self, record: &CreateProjectRecord) -> AppResult<ProjectRecord> {
        let project = ProjectRecord {
            id: ProjectId::new(),
            name: record.name.clone(),
            description: record.description.clone(),
            creator_id: record.creator_id.clone(),
            source_email: record.source_email.clone(),
            source_domain: record.source_domain.clone(),
            image_url: record.image_url.clone(),
            created_at: Utc::now(),
        };

        let mut doc = self.doc.lock().await;
        doc.projects.push(project.clone());
        if let Err(e) = self.persist(&doc).await {
            doc.projects.pop();
            return Err(e);
        }

        debug!(project_id = %project.id, name = %project.name, "Inserted project record");
        Ok(project)
    }

    async fn find_project(&self, id: ProjectId) -> AppResult<Option<ProjectRecord>> {
        let doc = self.doc.lock().await;
        Ok(doc.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn update_project(
        &self,
        id: ProjectId,
        changes: &UpdateProjectRecord,
    ) -> AppResult<Option<ProjectRecord>> {
        let mut doc = self.doc.lock().await;
        let mut next = doc.clone();
        let Some(project) = next.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        changes.apply_to(project);
        let updated = project.clone();
        self.persist(&next).await?;
        *doc = next;

        debug!(project_id = %id, "Updated project record");
        Ok(Some(updated))
    }

    async fn list_projects(&self) -> AppResult<Vec<ProjectRecord>> {
        let doc = self.doc.lock().await;
        let mut projects = doc.projects.clone();
        projects.reverse();
        Ok(projects)
    }

    async fn register_file(&self, record: &CreateFileRecord) -> AppResult<FileRecord> {
        let mut doc = self.doc.lock().await;
        if !doc.projects.iter().any(|p| p.id == record.project_id) {
            return Err(AppError::not_found(format!(
                "Project not found: {}",
                record.project_id
            )));
        }

        let file = FileRecord {
            id: FileRecordId::new(),
            project_id: record.project_id,
            creator_id: record.creator_id.clone(),
            name: record.name.clone(),
            size: record.size,
            mime_type: record.mime_type.clone(),
            path: record.path.clone(),
            url: record.url.clone(),
            created_at: Utc::now(),
        };
        doc.files.push(file.clone());
        if let Err(e) = self.persist(&doc).await {
            doc.files.pop();
            return Err(e);
        }

        debug!(project_id = %file.project_id, path = %file.path, "Registered file record");
        Ok(file)
    }

    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<FileRecord>> {
        let doc = self.doc.lock().await;
        Ok(doc
            .files
            .iter()
            .rev()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete_file(&self, path: &str) -> AppResult<bool> {
        let mut doc = self.doc.lock().await;
        let mut next = doc.clone();
        next.files.retain(|f| f.path != path);
        if next.files.len() == doc.files.len() {
            return Ok(false);
        }
        self.persist(&next).await?;
        *doc = next;
        Ok(true)
    }

    async fn delete_project(&self, id: ProjectId) -> AppResult<bool> {
        let mut doc = self.doc.lock().await;
        let mut next = doc.clone();
        next.projects.retain(|p| p.id != id);
        if next.projects.len() == doc.projects.len() {
            return Ok(false);
        }
        next.files.retain(|f| f.project_id != id);
        self.persist(&next).await?;
        *doc = next;
        Ok(true)
    }
}
