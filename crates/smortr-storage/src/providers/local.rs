//! Local filesystem object storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use smortr_core::config::StorageConfig;
use smortr_core::error::{AppError, ErrorKind};
use smortr_core::result::AppResult;
use smortr_core::traits::storage::{ObjectStorage, ProgressFn, StoredObject};
use smortr_core::types::TransferProgress;

/// Object storage rooted at `<data_root>/storage/<bucket>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    /// Directory holding the bucket's objects.
    root: PathBuf,
    bucket: String,
    public_base_url: String,
    chunk_size: usize,
    upsert: bool,
}

impl LocalObjectStorage {
    /// Create the provider, creating the bucket directory if needed.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = Path::new(&config.data_root)
            .join("storage")
            .join(&config.bucket);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            chunk_size: config.chunk_size_bytes.max(1) as usize,
            upsert: config.upsert,
        })
    }

    /// Resolve an object path to a location inside the bucket.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }

    /// Write `data` in chunks, reporting progress after each one.
    async fn write_chunks(
        &self,
        file: &mut fs::File,
        data: &Bytes,
        on_progress: Option<ProgressFn<'_>>,
    ) -> AppResult<()> {
        let total = data.len() as u64;
        let mut loaded = 0u64;
        for chunk in data.chunks(self.chunk_size) {
            file.write_all(chunk).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to write chunk", e)
            })?;
            loaded += chunk.len() as u64;
            if let Some(report) = on_progress {
                report(TransferProgress { loaded, total });
            }
        }
        if total == 0 {
            if let Some(report) = on_progress {
                report(TransferProgress { loaded: 0, total: 0 });
            }
        }
        file.flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush object", e))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        on_progress: Option<ProgressFn<'_>>,
    ) -> AppResult<StoredObject> {
        let full_path = self.resolve(path)?;
        self.ensure_parent(&full_path).await?;

        let mut options = fs::OpenOptions::new();
        options.write(true);
        if self.upsert {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = options.open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                AppError::conflict(format!("The object already exists: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create object: {path}"),
                    e,
                )
            }
        })?;

        let total = data.len() as u64;
        if let Err(e) = self.write_chunks(&mut file, &data, on_progress).await {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&full_path).await {
                warn!(path, error = %cleanup, "Failed to remove partial object");
            }
            return Err(e);
        }

        debug!(path, bytes = total, content_type, "Stored object");
        Ok(StoredObject {
            path: path.to_string(),
            size_bytes: total,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base_url,
            self.bucket,
            path.trim_start_matches('/')
        )
    }

    async fn remove(&self, paths: &[String]) -> AppResult<()> {
        for path in paths {
            let full_path = self.resolve(path)?;
            match fs::remove_file(&full_path).await {
                Ok(()) => debug!(path = %path, "Removed object"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to remove object: {path}"),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }
}
