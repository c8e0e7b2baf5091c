//! In-progress state of the project creation wizard.

use smortr_core::error::AppError;
use smortr_core::result::AppResult;
use smortr_core::types::FileId;

use super::cover::CoverImage;
use crate::file::StagedFile;
use crate::folder::FolderPath;

/// A project being drafted, with the files staged for it.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Selected cover image.
    pub cover_image: Option<CoverImage>,
    /// Staged files in staging order.
    pub files: Vec<StagedFile>,
}

impl ProjectDraft {
    /// Start an empty draft with the given default cover.
    pub fn new(cover_image: Option<CoverImage>) -> Self {
        Self {
            cover_image,
            ..Self::default()
        }
    }

    /// Check the fields required before anything is sent remotely.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Please enter a project name"));
        }
        Ok(())
    }

    /// Append staged files, keeping duplicates.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = StagedFile>) {
        self.files.extend(files);
    }

    /// Remove the staged entry holding the file `id`.
    pub fn unstage_file(&mut self, id: FileId) -> Option<StagedFile> {
        let index = self.files.iter().position(|f| f.file.id == id)?;
        Some(self.files.remove(index))
    }

    /// Files placed directly in the folder at `path`, in staging order.
    pub fn files_in_folder(&self, path: &FolderPath) -> Vec<&StagedFile> {
        self.files.iter().filter(|f| f.is_in(path)).collect()
    }

    /// Clear the draft and restore the default cover.
    pub fn reset(&mut self, cover_image: Option<CoverImage>) {
        *self = Self::new(cover_image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileHandle;

    fn staged(name: &str, path: &[&str]) -> StagedFile {
        StagedFile::new(
            FileHandle::new(name, "application/pdf", name.as_bytes().to_vec()),
            FolderPath::from_segments(path.iter().copied()),
        )
    }

    #[test]
    fn test_blank_name_fails_validation() {
        let mut draft = ProjectDraft::new(None);
        draft.name = "   ".to_string();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.kind, smortr_core::error::ErrorKind::Validation);
    }

    #[test]
    fn test_files_in_folder_is_exact() {
        let mut draft = ProjectDraft::new(None);
        draft.add_files([staged("a.pdf", &["A"]), staged("b.pdf", &["A", "B"])]);
        let in_a = draft.files_in_folder(&FolderPath::from_segments(["A"]));
        assert_eq!(in_a.len(), 1);
        assert_eq!(in_a[0].file.name, "a.pdf");
    }

    #[test]
    fn test_unstage_matches_identity_not_name() {
        let mut draft = ProjectDraft::new(None);
        let first = staged("dup.pdf", &["A"]);
        let second = staged("dup.pdf", &["A"]);
        let second_id = second.file.id;
        draft.add_files([first.clone(), second]);

        let removed = draft.unstage_file(second_id).unwrap();
        assert_eq!(removed.file.id, second_id);
        assert_eq!(draft.files, vec![first]);
        assert!(draft.unstage_file(second_id).is_none());
    }

    #[test]
    fn test_reset_restores_cover() {
        let cover = CoverImage::Sample("https://example.com/a.jpg".to_string());
        let mut draft = ProjectDraft::new(Some(cover.clone()));
        draft.name = "Tower A".to_string();
        draft.cover_image = Some(CoverImage::Uploaded("https://example.com/b.jpg".to_string()));
        draft.add_files([staged("a.pdf", &["A"])]);

        draft.reset(Some(cover.clone()));
        assert!(draft.name.is_empty());
        assert!(draft.files.is_empty());
        assert_eq!(draft.cover_image, Some(cover));
    }
}
