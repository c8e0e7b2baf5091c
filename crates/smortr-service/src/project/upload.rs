//! Upload-and-register of a single staged file.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use smortr_core::error::{AppError, ErrorKind};
use smortr_core::traits::storage::ObjectStorage;
use smortr_core::types::{ProjectId, TransferProgress, UploadProgress};
use smortr_entity::file::{CreateFileRecord, FileHandle, FileRecord, StagedFile};
use smortr_entity::folder::FolderPath;
use smortr_storage::ProjectIndex;

/// Callback receiving per-file upload progress.
pub type UploadProgressFn<'a> = &'a (dyn Fn(UploadProgress) + Send + Sync);

/// A staged file that was stored and registered.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Original file name.
    pub file_name: String,
    /// Folder the file was staged in.
    pub target_path: FolderPath,
    /// The registered metadata record.
    pub record: FileRecord,
}

/// A staged file that could not be attached.
///
/// `error.kind` is [`ErrorKind::FileUpload`] when the bytes were not
/// stored and [`ErrorKind::FileMetadata`] when the bytes were stored but
/// the record was rejected.
#[derive(Debug, Clone, Error)]
#[error("{file_name}: {error}")]
pub struct UploadFailure {
    /// Original file name.
    pub file_name: String,
    /// Folder the file was staged in.
    pub target_path: FolderPath,
    /// Storage path the upload was attempted at.
    pub storage_path: String,
    /// What went wrong.
    pub error: AppError,
}

/// Build a collision-resistant storage path for `file`.
///
/// Layout: `<project>/<folder segments>/<random>_<millis>.<ext>`; the
/// original extension is kept.
pub fn storage_path_for(project_id: ProjectId, target_path: &FolderPath, file: &FileHandle) -> String {
    let mut unique = format!("{}_{}", Uuid::new_v4().simple(), Utc::now().timestamp_millis());
    if let Some(ext) = file.extension() {
        unique.push('.');
        unique.push_str(ext);
    }
    if target_path.is_empty() {
        format!("{project_id}/{unique}")
    } else {
        format!("{project_id}/{}/{unique}", target_path.join("/"))
    }
}

/// Stores staged files and registers their metadata.
#[derive(Debug, Clone)]
pub struct FileUploader {
    storage: Arc<dyn ObjectStorage>,
    index: Arc<dyn ProjectIndex>,
}

impl FileUploader {
    /// Creates a new uploader.
    pub fn new(storage: Arc<dyn ObjectStorage>, index: Arc<dyn ProjectIndex>) -> Self {
        Self { storage, index }
    }

    /// Upload one staged file into `project_id` and register it.
    ///
    /// Progress percentages reported for the file never decrease.
    pub async fn upload(
        &self,
        project_id: ProjectId,
        creator_id: &str,
        staged: &StagedFile,
        on_progress: Option<UploadProgressFn<'_>>,
    ) -> Result<UploadOutcome, UploadFailure> {
        let file = &staged.file;
        let storage_path = storage_path_for(project_id, &staged.target_path, file);
        let fail = |error: AppError| UploadFailure {
            file_name: file.name.clone(),
            target_path: staged.target_path.clone(),
            storage_path: storage_path.clone(),
            error,
        };

        let high_water = AtomicU64::new(0);
        let relay = |p: TransferProgress| {
            if let Some(report) = on_progress {
                let loaded = high_water.fetch_max(p.loaded, Ordering::Relaxed).max(p.loaded);
                let progress = TransferProgress {
                    loaded,
                    total: p.total,
                };
                report(UploadProgress {
                    file_name: file.name.clone(),
                    percent_complete: progress.percent(),
                });
            }
        };

        self.storage
            .upload(&storage_path, file.data.clone(), &file.mime_type, Some(&relay))
            .await
            .map_err(|e| fail(e.reclassify(ErrorKind::FileUpload, "Failed to upload file")))?;

        let url = self.storage.public_url(&storage_path);
        let record = self
            .index
            .register_file(&CreateFileRecord {
                project_id,
                creator_id: creator_id.to_string(),
                name: file.name.clone(),
                size: file.size_bytes,
                mime_type: file.mime_type.clone(),
                path: storage_path.clone(),
                url,
            })
            .await
            .map_err(|e| {
                fail(e.reclassify(ErrorKind::FileMetadata, "Failed to register file metadata"))
            })?;

        Ok(UploadOutcome {
            file_name: file.name.clone(),
            target_path: staged.target_path.clone(),
            record,
        })
    }
}
