//! Project creation CLI command.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smortr_core::config::AppConfig;
use smortr_core::error::{AppError, ErrorKind};
use smortr_core::result::AppResult;
use smortr_core::types::UploadProgress;
use smortr_entity::file::FileHandle;
use smortr_entity::folder::FolderPath;
use smortr_entity::project::{CoverImage, ProjectDraft, ProjectRecord};
use smortr_service::FileTree;

/// Arguments for the create command
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project name
    #[arg(short, long)]
    pub name: String,

    /// Project description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Index of the sample cover image
    #[arg(long)]
    pub cover: Option<usize>,

    /// Extra folder as PARENT=NAME (PARENT is a `/`-separated path, empty for a root)
    #[arg(long = "folder", value_name = "PARENT=NAME")]
    pub folders: Vec<String>,

    /// File to upload as FOLDER=PATH; a bare PATH goes to the drop fallback folder
    #[arg(long = "file", value_name = "FOLDER=PATH")]
    pub files: Vec<String>,
}

/// Upload result row for table output
#[derive(Debug, Serialize, Tabled)]
struct UploadRow {
    /// File name
    file: String,
    /// Target folder
    folder: String,
    /// Result
    status: String,
    /// Storage path or error
    detail: String,
}

#[derive(Debug, Serialize)]
struct CreatedView<'a> {
    project: &'a ProjectRecord,
    uploads: &'a [UploadRow],
}

/// Execute the create command
pub async fn execute(args: &CreateArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let session = super::session_store(config).load().await?;

    let mut tree = FileTree::from_config(&config.project);
    for pair in &args.folders {
        let (parent, name) = split_pair(pair, "--folder")?;
        let parent = FolderPath::parse(parent);
        tree.add_folder(&parent, name).ok_or_else(|| {
            AppError::validation(format!("Cannot add folder '{}' under '{}'", name, parent))
        })?;
    }

    let cover = match args.cover {
        Some(i) => Some(CoverImage::sample(&config.project, i).ok_or_else(|| {
            AppError::validation(format!(
                "Cover index {} out of range (0..{})",
                i,
                config.project.sample_cover_images.len()
            ))
        })?),
        None => CoverImage::default_for(&config.project),
    };

    let mut draft = ProjectDraft::new(cover);
    draft.name = args.name.clone();
    draft.description = args.description.clone();

    for pair in &args.files {
        let (folder, path) = match pair.split_once('=') {
            Some((folder, path)) => (Some(FolderPath::parse(folder)), path),
            None => (None, pair.as_str()),
        };
        let handle = read_file(PathBuf::from(path)).await?;
        match folder {
            Some(target) => {
                if tree.folders().find_by_path(&target).is_none() {
                    return Err(AppError::validation(format!("Unknown folder '{}'", target)));
                }
                tree.stage_files(&mut draft, vec![handle], &target);
            }
            None => {
                tree.drop_files(&mut draft, vec![handle], None);
            }
        }
    }

    if format == OutputFormat::Table {
        println!("Staged {} file(s):", draft.files.len());
        for staged in &draft.files {
            output::print_field(
                &staged.file.name,
                &format!("{} → {}", staged.file.size_label(), staged.path_label()),
            );
        }
    }

    let report = |p: UploadProgress| {
        if format == OutputFormat::Table {
            eprint!("\r  {:<40} {:>5.1}%", p.file_name, p.percent_complete);
            if p.percent_complete >= 100.0 {
                eprintln!();
            }
        }
    };

    let service = super::project_service(config).await?;
    let identity = session.identity().ok();
    let created = service
        .submit(&draft, identity.as_ref(), Some(&report))
        .await?;

    let rows: Vec<UploadRow> = created
        .uploads
        .iter()
        .map(|result| match result {
            Ok(outcome) => UploadRow {
                file: outcome.file_name.clone(),
                folder: outcome.target_path.to_string(),
                status: "uploaded".to_string(),
                detail: outcome.record.path.clone(),
            },
            Err(failure) => UploadRow {
                file: failure.file_name.clone(),
                folder: failure.target_path.to_string(),
                status: "failed".to_string(),
                detail: failure.error.to_string(),
            },
        })
        .collect();

    match format {
        OutputFormat::Json => output::print_json(&CreatedView {
            project: &created.project,
            uploads: &rows,
        }),
        OutputFormat::Table => {
            output::print_success(&format!(
                "Project '{}' created (id: {})",
                created.project.name, created.project.id
            ));
            output::print_field("Cover", &created.project.image_url);
            output::print_field("Domain", &created.project.source_domain);
            output::print_rows(&rows, format, "No files staged.");
            let failed = created.failures().len();
            if failed > 0 {
                output::print_warning(&format!(
                    "{} of {} file(s) could not be attached",
                    failed,
                    rows.len()
                ));
            }
        }
    }
    Ok(())
}

fn split_pair<'a>(pair: &'a str, flag: &str) -> AppResult<(&'a str, &'a str)> {
    pair.split_once('=')
        .ok_or_else(|| AppError::validation(format!("{} expects LEFT=RIGHT, got '{}'", flag, pair)))
}

async fn read_file(path: PathBuf) -> AppResult<FileHandle> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?
        .to_string();
    let data = tokio::fs::read(&path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::NotFound,
            format!("Failed to read {}", path.display()),
            e,
        )
    })?;
    let mime = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();
    Ok(FileHandle::new(name, mime, data))
}
