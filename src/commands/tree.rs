//! Folder template display.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smortr_core::config::AppConfig;
use smortr_core::result::AppResult;
use smortr_entity::project::ProjectDraft;
use smortr_service::FileTree;

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Show collapsed branches too
    #[arg(short, long)]
    pub all: bool,
}

/// Folder display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder
    folder: String,
    /// Path
    path: String,
}

/// Execute the tree command
pub fn execute(args: &TreeArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let mut tree = FileTree::from_config(&config.project);
    if args.all {
        expand_all(&mut tree);
    }

    let rows: Vec<FolderRow> = tree
        .visible_rows(&ProjectDraft::default())
        .into_iter()
        .filter_map(|row| {
            let node = tree.folders().get(row.id)?;
            let marker = if node.children.is_empty() {
                " "
            } else if row.expanded {
                "▾"
            } else {
                "▸"
            };
            Some(FolderRow {
                folder: format!("{}{} {}", "  ".repeat(row.depth), marker, row.name),
                path: node.path.join("/"),
            })
        })
        .collect();

    output::print_rows(&rows, format, "No folders.");
    Ok(())
}

/// Expand every folder of `tree`.
pub fn expand_all(tree: &mut FileTree) {
    let collapsed: Vec<_> = tree
        .folders()
        .walk()
        .into_iter()
        .map(|node| node.id)
        .filter(|id| !tree.is_expanded(*id))
        .collect();
    for id in collapsed {
        tree.toggle_expand(id);
    }
}
