//! Project creation wizard configuration.

use serde::{Deserialize, Serialize};

const SAMPLE_COVERS: [&str; 3] = [
    "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?q=80&w=2158&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1574359411659-15573a27fd0c?q=80&w=1000&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?q=80&w=2070&auto=format&fit=crop",
];

/// Settings for drafting and submitting new projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Fixed set of cover images offered by the wizard.
    #[serde(default = "default_sample_covers")]
    pub sample_cover_images: Vec<String>,
    /// Cover image used when a draft has none selected.
    #[serde(default = "default_placeholder")]
    pub placeholder_cover_image: String,
    /// Folder path that receives files dropped outside any folder.
    #[serde(default = "default_drop_fallback")]
    pub drop_fallback_path: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            sample_cover_images: default_sample_covers(),
            placeholder_cover_image: default_placeholder(),
            drop_fallback_path: default_drop_fallback(),
        }
    }
}

fn default_sample_covers() -> Vec<String> {
    SAMPLE_COVERS.iter().map(|s| s.to_string()).collect()
}

fn default_placeholder() -> String {
    SAMPLE_COVERS[0].to_string()
}

fn default_drop_fallback() -> Vec<String> {
    vec!["uploads".to_string()]
}
