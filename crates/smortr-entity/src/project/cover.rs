//! Project cover images.

use serde::{Deserialize, Serialize};

use smortr_core::config::ProjectConfig;

/// The cover image chosen for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "url", rename_all = "snake_case")]
pub enum CoverImage {
    /// One of the configured sample images.
    Sample(String),
    /// An image supplied by the user.
    Uploaded(String),
}

impl CoverImage {
    /// The `index`-th configured sample, if it exists.
    pub fn sample(config: &ProjectConfig, index: usize) -> Option<Self> {
        config
            .sample_cover_images
            .get(index)
            .map(|url| Self::Sample(url.clone()))
    }

    /// The default selection: the first configured sample.
    pub fn default_for(config: &ProjectConfig) -> Option<Self> {
        Self::sample(config, 0)
    }

    /// Reference stored on the project record.
    pub fn url(&self) -> &str {
        match self {
            Self::Sample(url) | Self::Uploaded(url) => url,
        }
    }
}
