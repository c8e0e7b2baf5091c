//! CLI command definitions and dispatch.

pub mod create;
pub mod project;
pub mod session;
pub mod tree;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use smortr_core::config::AppConfig;
use smortr_core::error::AppError;
use smortr_core::result::AppResult;
use smortr_core::types::ProjectId;
use smortr_service::{ProjectService, SessionStore};
use smortr_storage::{JsonProjectIndex, LocalObjectStorage};

/// Smortr: draft projects, arrange their files in folders, and create them
#[derive(Debug, Parser)]
#[command(name = "smortr", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/smortr.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the default folder template
    Tree(tree::TreeArgs),
    /// Sign in with an existing account
    Login(session::LoginArgs),
    /// Sign out and reset preferences
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Create a project and upload its files
    Create(create::CreateArgs),
    /// List projects
    Projects,
    /// List the files of a project
    Files {
        /// Project ID
        project: String,
    },
    /// Change a project's name, description or cover
    Update(project::UpdateArgs),
    /// Delete a project and all of its files
    Delete {
        /// Project ID
        project: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Tree(args) => tree::execute(args, config, self.format),
            Commands::Login(args) => session::login(args, config).await,
            Commands::Logout => session::logout(config).await,
            Commands::Whoami => session::whoami(config, self.format).await,
            Commands::Create(args) => create::execute(args, config, self.format).await,
            Commands::Projects => project::list(config, self.format).await,
            Commands::Files { project } => {
                project::files(parse_project_id(project)?, config, self.format).await
            }
            Commands::Update(args) => {
                project::update(parse_project_id(&args.project)?, args, config, self.format).await
            }
            Commands::Delete { project, yes } => {
                project::delete(parse_project_id(project)?, *yes, config).await
            }
        }
    }
}

/// Helper: build the project service over the local backend
pub async fn project_service(config: &AppConfig) -> AppResult<ProjectService> {
    let storage = Arc::new(LocalObjectStorage::new(&config.storage).await?);
    let index = Arc::new(JsonProjectIndex::open(&config.storage.data_root).await?);
    Ok(ProjectService::new(index, storage, config.project.clone()))
}

/// Helper: open the configured session store
pub fn session_store(config: &AppConfig) -> SessionStore {
    SessionStore::new(&config.session)
}

fn parse_project_id(raw: &str) -> AppResult<ProjectId> {
    raw.parse()
        .map_err(|e| AppError::validation(format!("Invalid project ID '{}': {}", raw, e)))
}
