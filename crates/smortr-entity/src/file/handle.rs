//! Raw file handles supplied by a file picker or a drop event.

use bytes::Bytes;

use smortr_core::types::FileId;

/// A raw file: name, size, MIME type and bytes.
///
/// The bytes are reference counted, so cloning a handle never copies
/// content. Identity is carried by `id`, not by the name.
#[derive(Debug, Clone)]
pub struct FileHandle {
    /// Identity of this handle.
    pub id: FileId,
    /// Original file name, including extension.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type (may be empty when unknown).
    pub mime_type: String,
    /// File content.
    pub data: Bytes,
}

impl FileHandle {
    /// Wrap raw content in a new handle with a fresh identity.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            id: FileId::new(),
            name: name.into(),
            size_bytes: data.len() as u64,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// The text after the last `.` in the name, if any.
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Human readable size, e.g. `"12.5 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FileHandle {}
