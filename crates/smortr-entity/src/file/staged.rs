//! Files assigned to a folder path, pending upload.

use crate::folder::FolderPath;

use super::handle::FileHandle;

/// A file selected by the user and assigned to a target folder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// The raw file.
    pub file: FileHandle,
    /// Folder the file is placed in.
    pub target_path: FolderPath,
}

impl StagedFile {
    /// Assign `file` to `target_path`.
    pub fn new(file: FileHandle, target_path: FolderPath) -> Self {
        Self { file, target_path }
    }

    /// Whether this file sits directly in the folder at `path`.
    pub fn is_in(&self, path: &FolderPath) -> bool {
        self.target_path == *path
    }

    /// Folder path for display, segments joined by `" / "`.
    pub fn path_label(&self) -> String {
        self.target_path.to_string()
    }
}
