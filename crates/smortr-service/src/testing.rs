//! Recording collaborators for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use smortr_core::error::AppError;
use smortr_core::result::AppResult;
use smortr_core::traits::storage::{ObjectStorage, ProgressFn, StoredObject};
use smortr_core::types::{FileRecordId, ProjectId, TransferProgress};
use smortr_entity::file::{CreateFileRecord, FileRecord};
use smortr_entity::project::{CreateProjectRecord, ProjectRecord, UpdateProjectRecord};
use smortr_storage::ProjectIndex;

/// Object storage that records every upload and fails on request.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    /// Paths passed to `upload`, in call order.
    pub uploads: Mutex<Vec<String>>,
    /// Paths passed to `remove`.
    pub removed: Mutex<Vec<String>>,
    /// 1-based upload call that fails.
    pub fail_on_call: Option<usize>,
    /// Progress events emitted per upload.
    pub progress_steps: u64,
    /// Exact `loaded` values to report instead of even steps.
    pub scripted_loaded: Option<Vec<u64>>,
}

impl RecordingStorage {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        _content_type: &str,
        on_progress: Option<ProgressFn<'_>>,
    ) -> AppResult<StoredObject> {
        let call = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push(path.to_string());
            uploads.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(AppError::storage("connection reset"));
        }

        let total = data.len() as u64;
        if let (Some(report), Some(script)) = (on_progress, &self.scripted_loaded) {
            for &loaded in script {
                report(TransferProgress { loaded, total });
            }
        } else if let Some(report) = on_progress {
            let steps = self.progress_steps.max(1);
            for step in 1..=steps {
                report(TransferProgress {
                    loaded: total * step / steps,
                    total,
                });
            }
        }
        Ok(StoredObject {
            path: path.to_string(),
            size_bytes: total,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.example.com/project-files/{path}")
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        self.removed.lock().unwrap().extend(paths.iter().cloned());
        Ok(())
    }
}

/// Project index that keeps records in memory and counts calls.
#[derive(Debug, Default)]
pub struct RecordingIndex {
    pub create_calls: AtomicUsize,
    pub fail_create: bool,
    /// 1-based `register_file` call that fails.
    pub fail_register_on_call: Option<usize>,
    pub register_calls: AtomicUsize,
    pub projects: Mutex<Vec<ProjectRecord>>,
    pub files: Mutex<Vec<FileRecord>>,
}

impl RecordingIndex {
    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectIndex for RecordingIndex {
    async fn create_project(&self, record: &CreateProjectRecord) -> AppResult<ProjectRecord> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(AppError::database("insert rejected"));
        }
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
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn find_project(&self, id: ProjectId) -> AppResult<Option<ProjectRecord>> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn update_project(
        &self,
        id: ProjectId,
        changes: &UpdateProjectRecord,
    ) -> AppResult<Option<ProjectRecord>> {
        let mut projects = self.projects.lock().unwrap();
        Ok(projects.iter_mut().find(|p| p.id == id).map(|p| {
            changes.apply_to(p);
            p.clone()
        }))
    }

    async fn list_projects(&self) -> AppResult<Vec<ProjectRecord>> {
        Ok(self.projects.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn register_file(&self, record: &CreateFileRecord) -> AppResult<FileRecord> {
        let call = self.register_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_register_on_call == Some(call) {
            return Err(AppError::database("metadata insert rejected"));
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
        self.files.lock().unwrap().push(file.clone());
        Ok(file)
    }

    async fn list_files(&self, project_id: ProjectId) -> AppResult<Vec<FileRecord>> {
        Ok(self
            .files
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn delete_file(&self, path: &str) -> AppResult<bool> {
        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.path != path);
        Ok(files.len() != before)
    }

    async fn delete_project(&self, id: ProjectId) -> AppResult<bool> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != id);
        self.files.lock().unwrap().retain(|f| f.project_id != id);
        Ok(projects.len() != before)
    }
}
