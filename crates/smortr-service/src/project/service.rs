//! Project creation workflow: one transactional record insert followed by
//! best-effort attachment of every staged file.

use std::sync::Arc;

use tracing::{error, info};

use smortr_core::config::ProjectConfig;
use smortr_core::error::{AppError, ErrorKind};
use smortr_core::result::AppResult;
use smortr_core::traits::storage::ObjectStorage;
use smortr_core::types::ProjectId;
use smortr_entity::file::FileRecord;
use smortr_entity::project::{
    CreateProjectRecord, ProjectDraft, ProjectRecord, UpdateProjectRecord,
};
use smortr_entity::session::CreatorIdentity;
use smortr_storage::ProjectIndex;

use super::upload::{FileUploader, UploadFailure, UploadOutcome, UploadProgressFn};

/// A created project with the result of every attempted file attachment.
#[derive(Debug, Clone)]
pub struct CreatedProject {
    /// The created project record.
    pub project: ProjectRecord,
    /// One entry per staged file, in staging order.
    pub uploads: Vec<Result<UploadOutcome, UploadFailure>>,
}

impl CreatedProject {
    /// Files that could not be attached.
    pub fn failures(&self) -> Vec<&UploadFailure> {
        self.uploads.iter().filter_map(|r| r.as_ref().err()).collect()
    }

    /// Number of files attached successfully.
    pub fn attached(&self) -> usize {
        self.uploads.iter().filter(|r| r.is_ok()).count()
    }
}

/// Creates projects and manages their files.
#[derive(Debug, Clone)]
pub struct ProjectService {
    index: Arc<dyn ProjectIndex>,
    storage: Arc<dyn ObjectStorage>,
    uploader: FileUploader,
    config: ProjectConfig,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        index: Arc<dyn ProjectIndex>,
        storage: Arc<dyn ObjectStorage>,
        config: ProjectConfig,
    ) -> Self {
        let uploader = FileUploader::new(storage.clone(), index.clone());
        Self {
            index,
            storage,
            uploader,
            config,
        }
    }

    /// Create the project described by `draft` and attach its files.
    ///
    /// Fails with a validation error before any remote call when the name
    /// is blank or no identity is given, and with a project creation error
    /// when the record insert fails (no file is uploaded in that case).
    /// Once the record exists the call succeeds: files are uploaded one
    /// at a time and each failure is logged and reported in
    /// [`CreatedProject::uploads`] without stopping the remaining files.
    pub async fn submit(
        &self,
        draft: &ProjectDraft,
        identity: Option<&CreatorIdentity>,
        on_progress: Option<UploadProgressFn<'_>>,
    ) -> AppResult<CreatedProject> {
        draft.validate()?;
        let identity =
            identity.ok_or_else(|| AppError::validation("A signed-in creator is required"))?;

        let image_url = draft
            .cover_image
            .as_ref()
            .map(|c| c.url().to_string())
            .unwrap_or_else(|| self.config.placeholder_cover_image.clone());

        let fields = CreateProjectRecord {
            name: draft.name.trim().to_string(),
            description: draft.description.clone(),
            creator_id: identity.id.clone(),
            source_email: identity.email.clone(),
            source_domain: identity.source_domain.clone(),
            image_url,
        };

        let project = self.index.create_project(&fields).await.map_err(|e| {
            error!(name = %fields.name, error = %e, "Error creating project");
            e.reclassify(ErrorKind::ProjectCreation, "Failed to create project")
        })?;

        info!(
            project_id = %project.id,
            name = %project.name,
            files = draft.files.len(),
            "Project created"
        );

        let mut uploads = Vec::with_capacity(draft.files.len());
        for staged in &draft.files {
            let result = self
                .uploader
                .upload(project.id, &identity.id, staged, on_progress)
                .await;
            if let Err(failure) = &result {
                error!(
                    project_id = %project.id,
                    file = %failure.file_name,
                    path = %failure.storage_path,
                    error = %failure.error,
                    "Error uploading file"
                );
            }
            uploads.push(result);
        }

        let created = CreatedProject { project, uploads };
        info!(
            project_id = %created.project.id,
            attached = created.attached(),
            failed = created.failures().len(),
            "Project files processed"
        );
        Ok(created)
    }

    /// Look up a project.
    pub async fn get_project(&self, id: ProjectId) -> AppResult<ProjectRecord> {
        self.index
            .find_project(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project not found: {id}")))
    }

    /// Change the name, description or cover of a project.
    ///
    /// A new name is trimmed and must not be blank.
    pub async fn update_project(
        &self,
        id: ProjectId,
        mut changes: UpdateProjectRecord,
    ) -> AppResult<ProjectRecord> {
        if let Some(name) = changes.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Please enter a project name"));
            }
        }
        if changes.is_empty() {
            return self.get_project(id).await;
        }

        let project = self
            .index
            .update_project(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project not found: {id}")))?;
        info!(project_id = %id, name = %project.name, "Project updated");
        Ok(project)
    }

    /// All projects, newest first.
    pub async fn list_projects(&self) -> AppResult<Vec<ProjectRecord>> {
        self.index.list_projects().await
    }

    /// Files registered for a project, newest first.
    pub async fn list_files(&self, id: ProjectId) -> AppResult<Vec<FileRecord>> {
        self.index.list_files(id).await
    }

    /// Remove one stored file, then its metadata record.
    pub async fn delete_file(&self, path: &str) -> AppResult<()> {
        self.storage.remove(&[path.to_string()]).await?;
        if !self.index.delete_file(path).await? {
            return Err(AppError::not_found(format!("File not found: {path}")));
        }
        info!(path, "File deleted");
        Ok(())
    }

    /// Remove every stored file of a project, then the project and its records.
    pub async fn delete_project(&self, id: ProjectId) -> AppResult<()> {
        let paths: Vec<String> = self
            .index
            .list_files(id)
            .await?
            .into_iter()
            .map(|f| f.path)
            .collect();
        self.storage.remove(&paths).await?;

        if !self.index.delete_project(id).await? {
            return Err(AppError::not_found(format!("Project not found: {id}")));
        }
        info!(project_id = %id, files = paths.len(), "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::*;
    use crate::folder::FileTree;
    use crate::testing::{RecordingIndex, RecordingStorage};
    use smortr_core::types::UploadProgress;
    use smortr_entity::file::FileHandle;
    use smortr_entity::folder::FolderPath;
    use smortr_entity::project::CoverImage;

    /// Counts ERROR-level events on the current thread.
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn service(index: Arc<RecordingIndex>, storage: Arc<RecordingStorage>) -> ProjectService {
        ProjectService::new(index, storage, ProjectConfig::default())
    }

    fn identity() -> CreatorIdentity {
        CreatorIdentity::new("u1", "a@b.com").unwrap()
    }

    fn draft_with_files(names: &[&str]) -> ProjectDraft {
        let mut draft = ProjectDraft::new(CoverImage::default_for(&ProjectConfig::default()));
        draft.name = "Tower A".to_string();
        draft.description = "desc".to_string();
        let tree = FileTree::from_config(&ProjectConfig::default());
        let files = names
            .iter()
            .map(|n| FileHandle::new(*n, "application/pdf", vec![1u8; 64]))
            .collect();
        tree.stage_files(&mut draft, files, &FolderPath::from_segments(["Level 1"]));
        draft
    }

    #[tokio::test]
    async fn test_blank_name_makes_no_remote_call() {
        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index.clone(), storage.clone());

        let mut draft = draft_with_files(&["a.pdf"]);
        draft.name = "  ".to_string();
        let err = svc.submit(&draft, Some(&identity()), None).await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(index.create_count(), 0);
        assert_eq!(storage.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_identity_is_validation_error() {
        let index = Arc::new(RecordingIndex::default());
        let svc = service(index.clone(), Arc::new(RecordingStorage::default()));

        let err = svc
            .submit(&draft_with_files(&[]), None, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(index.create_count(), 0);
    }

    #[tokio::test]
    async fn test_create_failure_skips_uploads() {
        let index = Arc::new(RecordingIndex::failing_create());
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index.clone(), storage.clone());

        let err = svc
            .submit(&draft_with_files(&["a.pdf", "b.pdf"]), Some(&identity()), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::ProjectCreation);
        assert_eq!(index.create_count(), 1);
        assert_eq!(storage.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_second_upload_failure_does_not_stop_the_rest() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage::failing_on(2));
        let svc = service(index.clone(), storage.clone());

        let created = svc
            .submit(&draft_with_files(&["a.pdf", "b.pdf", "c.pdf"]), Some(&identity()), None)
            .await
            .unwrap();

        assert_eq!(storage.upload_count(), 3);
        assert_eq!(created.project.name, "Tower A");
        assert_eq!(created.uploads.len(), 3);
        assert!(created.uploads[0].is_ok());
        assert!(created.uploads[2].is_ok());

        let failures = created.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file_name, "b.pdf");
        assert_eq!(failures[0].error.kind, ErrorKind::FileUpload);
        assert_eq!(index.files.lock().unwrap().len(), 2);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_metadata_failure_is_swallowed() {
        let index = Arc::new(RecordingIndex {
            fail_register_on_call: Some(1),
            ..RecordingIndex::default()
        });
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index.clone(), storage.clone());

        let created = svc
            .submit(&draft_with_files(&["a.pdf", "b.pdf"]), Some(&identity()), None)
            .await
            .unwrap();
        assert_eq!(created.attached(), 1);
        assert_eq!(created.failures()[0].error.kind, ErrorKind::FileMetadata);
    }

    #[tokio::test]
    async fn test_scenario_tower_a() {
        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index.clone(), storage.clone());

        let mut draft = ProjectDraft::new(None);
        draft.name = "Tower A".to_string();
        draft.description = "desc".to_string();
        let tree = FileTree::from_config(&ProjectConfig::default());
        tree.stage_files(
            &mut draft,
            vec![FileHandle::new("fileX.pdf", "application/pdf", "x")],
            &FolderPath::from_segments(["Level 1"]),
        );
        tree.stage_files(
            &mut draft,
            vec![FileHandle::new("fileY.dwg", "image/vnd.dwg", "y")],
            &FolderPath::from_segments(["Level 1", "Arch"]),
        );

        let created = svc.submit(&draft, Some(&identity()), None).await.unwrap();
        let project = &created.project;
        assert_eq!(project.name, "Tower A");
        assert_eq!(project.creator_id, "u1");
        assert_eq!(project.source_email, "a@b.com");
        assert_eq!(project.source_domain, "b.com");
        assert_eq!(
            project.image_url,
            ProjectConfig::default().placeholder_cover_image
        );

        let uploads = storage.uploads.lock().unwrap().clone();
        assert_eq!(uploads.len(), 2);
        assert!(uploads[0].starts_with(&format!("{}/Level 1/", project.id)));
        assert!(!uploads[0].contains("Level 1/Arch"));
        assert!(uploads[1].starts_with(&format!("{}/Level 1/Arch/", project.id)));

        let files = svc.list_files(project.id).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.url.ends_with(&f.path)));
    }

    #[tokio::test]
    async fn test_chosen_cover_is_used() {
        let index = Arc::new(RecordingIndex::default());
        let svc = service(index, Arc::new(RecordingStorage::default()));

        let mut draft = draft_with_files(&[]);
        draft.cover_image = CoverImage::sample(&ProjectConfig::default(), 2);
        let created = svc.submit(&draft, Some(&identity()), None).await.unwrap();
        assert_eq!(
            created.project.image_url,
            ProjectConfig::default().sample_cover_images[2]
        );
    }

    #[tokio::test]
    async fn test_progress_reported_per_file() {
        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage {
            progress_steps: 3,
            ..RecordingStorage::default()
        });
        let svc = service(index, storage);

        let seen = Mutex::new(Vec::new());
        let record = |p: UploadProgress| seen.lock().unwrap().push(p);
        svc.submit(&draft_with_files(&["a.pdf", "b.pdf"]), Some(&identity()), Some(&record))
            .await
            .unwrap();

        let seen = seen.into_inner().unwrap();
        for name in ["a.pdf", "b.pdf"] {
            let percents: Vec<f64> = seen
                .iter()
                .filter(|p| p.file_name == name)
                .map(|p| p.percent_complete)
                .collect();
            assert_eq!(percents.len(), 3);
            assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[tokio::test]
    async fn test_update_project_fields() {
        let index = Arc::new(RecordingIndex::default());
        let svc = service(index, Arc::new(RecordingStorage::default()));
        let created = svc
            .submit(&draft_with_files(&[]), Some(&identity()), None)
            .await
            .unwrap();
        let id = created.project.id;

        let updated = svc
            .update_project(
                id,
                UpdateProjectRecord {
                    name: Some("  Tower B ".to_string()),
                    image_url: Some("https://example.com/b.jpg".to_string()),
                    ..UpdateProjectRecord::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Tower B");
        assert_eq!(updated.description, "desc");
        assert_eq!(updated.image_url, "https://example.com/b.jpg");
        assert_eq!(svc.get_project(id).await.unwrap().name, "Tower B");

        let err = svc
            .update_project(
                id,
                UpdateProjectRecord {
                    name: Some("   ".to_string()),
                    ..UpdateProjectRecord::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = svc
            .update_project(
                ProjectId::new(),
                UpdateProjectRecord {
                    description: Some("x".to_string()),
                    ..UpdateProjectRecord::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_project_removes_objects_first() {
        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index.clone(), storage.clone());

        let created = svc
            .submit(&draft_with_files(&["a.pdf", "b.pdf"]), Some(&identity()), None)
            .await
            .unwrap();
        svc.delete_project(created.project.id).await.unwrap();

        assert_eq!(storage.removed.lock().unwrap().len(), 2);
        assert!(svc.list_files(created.project.id).await.unwrap().is_empty());
        let err = svc.get_project(created.project.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = svc.delete_project(created.project.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_single_file() {
        let index = Arc::new(RecordingIndex::default());
        let storage = Arc::new(RecordingStorage::default());
        let svc = service(index, storage.clone());

        let created = svc
            .submit(&draft_with_files(&["a.pdf"]), Some(&identity()), None)
            .await
            .unwrap();
        let path = created.uploads[0].as_ref().unwrap().record.path.clone();
        svc.delete_file(&path).await.unwrap();
        assert_eq!(*storage.removed.lock().unwrap(), vec![path]);
        assert!(svc.list_files(created.project.id).await.unwrap().is_empty());
    }
}
