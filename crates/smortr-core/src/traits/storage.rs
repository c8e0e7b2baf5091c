//! Object storage trait for the remote file store.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::TransferProgress;

/// Callback receiving byte-level progress events during an upload.
pub type ProgressFn<'a> = &'a (dyn Fn(TransferProgress) + Send + Sync);

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredObject {
    /// Path of the object within the bucket.
    pub path: String,
    /// Number of bytes written.
    pub size_bytes: u64,
}

/// Trait for the remote object store that receives project files.
///
/// The local filesystem implementation lives in `smortr-storage`.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Upload `data` to `path`.
    ///
    /// `on_progress`, when supplied, receives `{loaded, total}` events with
    /// non-decreasing `loaded` values. A final event at `loaded == total`
    /// is not guaranteed.
    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: &str,
        on_progress: Option<ProgressFn<'_>>,
    ) -> AppResult<StoredObject>;

    /// Derive the publicly reachable URL of a previously uploaded path.
    fn public_url(&self, path: &str) -> String;

    /// Remove the objects at the given paths. Missing objects are ignored.
    async fn remove(&self, paths: &[String]) -> AppResult<()>;
}
