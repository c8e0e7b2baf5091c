//! Project listing and deletion CLI commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smortr_core::config::AppConfig;
use smortr_core::error::AppError;
use smortr_core::result::AppResult;
use smortr_core::types::ProjectId;
use smortr_entity::project::{CoverImage, UpdateProjectRecord};

/// Arguments for the update command
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Project ID
    pub project: String,

    /// New project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Index of the new sample cover image
    #[arg(long)]
    pub cover: Option<usize>,
}

/// Project display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProjectRow {
    /// Project ID
    id: String,
    /// Name
    name: String,
    /// Creator email
    creator: String,
    /// Created at
    created_at: String,
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File name
    name: String,
    /// Size in bytes
    size: u64,
    /// MIME type
    mime_type: String,
    /// Storage path
    path: String,
    /// Public URL
    url: String,
}

/// List all projects
pub async fn list(config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let service = super::project_service(config).await?;
    let rows: Vec<ProjectRow> = service
        .list_projects()
        .await?
        .into_iter()
        .map(|p| ProjectRow {
            id: p.id.to_string(),
            name: p.name,
            creator: p.source_email,
            created_at: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();
    output::print_rows(&rows, format, "No projects yet.");
    Ok(())
}

/// List the files of a project
pub async fn files(id: ProjectId, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let service = super::project_service(config).await?;
    service.get_project(id).await?;

    let rows: Vec<FileRow> = service
        .list_files(id)
        .await?
        .into_iter()
        .map(|f| FileRow {
            name: f.name,
            size: f.size,
            mime_type: f.mime_type,
            path: f.path,
            url: f.url,
        })
        .collect();
    output::print_rows(&rows, format, "No files registered for this project.");
    Ok(())
}

/// Update a project's name, description or cover
pub async fn update(
    id: ProjectId,
    args: &UpdateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let image_url = match args.cover {
        Some(i) => Some(
            CoverImage::sample(&config.project, i)
                .ok_or_else(|| AppError::validation(format!("Cover index {} out of range", i)))?
                .url()
                .to_string(),
        ),
        None => None,
    };
    let changes = UpdateProjectRecord {
        name: args.name.clone(),
        description: args.description.clone(),
        image_url,
    };

    let service = super::project_service(config).await?;
    let project = service.update_project(id, changes).await?;
    match format {
        OutputFormat::Json => output::print_json(&project),
        OutputFormat::Table => {
            output::print_success(&format!("Project '{}' updated", project.name));
            output::print_field("Description", &project.description);
            output::print_field("Cover", &project.image_url);
        }
    }
    Ok(())
}

/// Delete a project and its files
pub async fn delete(id: ProjectId, yes: bool, config: &AppConfig) -> AppResult<()> {
    let service = super::project_service(config).await?;
    let project = service.get_project(id).await?;

    if !yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete project '{}' and all of its files?",
                project.name
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete_project(id).await?;
    output::print_success(&format!("Project '{}' deleted", project.name));
    Ok(())
}
