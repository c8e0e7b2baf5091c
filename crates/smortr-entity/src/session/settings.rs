//! Per-user application preferences.

use serde::{Deserialize, Serialize};

/// Default layout of project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Card grid.
    Grid,
    /// Compact list.
    List,
    /// Sortable table.
    Table,
}

/// User preferences persisted with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auto_reload: bool,
    pub default_view_mode: ViewMode,
    /// Minutes between automatic saves.
    pub auto_save_interval: u32,
    pub show_version_history: bool,
    pub enable_annotations: bool,
    pub enable_comments: bool,
    pub email_notifications: bool,
    pub document_updates: bool,
    pub comment_notifications: bool,
    pub version_updates: bool,
    pub two_factor_auth: bool,
    pub require_approval: bool,
    pub document_watermark: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_reload: true,
            default_view_mode: ViewMode::Grid,
            auto_save_interval: 5,
            show_version_history: true,
            enable_annotations: true,
            enable_comments: true,
            email_notifications: true,
            document_updates: true,
            comment_notifications: true,
            version_updates: true,
            two_factor_auth: false,
            require_approval: true,
            document_watermark: true,
        }
    }
}
