//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file
//! merged with `SMORTR__`-prefixed environment variables via the `config`
//! crate. Each sub-module represents a logical configuration section.

pub mod logging;
pub mod project;
pub mod session;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::project::ProjectConfig;
pub use self::session::SessionConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Object storage and project index settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Project creation wizard settings.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Persisted session settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Values are overridden by environment variables
    /// prefixed with `SMORTR__`, e.g. `SMORTR__STORAGE__BUCKET`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SMORTR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load("does/not/exist/smortr").unwrap();
        assert_eq!(config.storage.bucket, "project-files");
        assert_eq!(config.project.drop_fallback_path, vec!["uploads".to_string()]);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_placeholder_is_first_sample() {
        let config = ProjectConfig::default();
        assert_eq!(
            config.placeholder_cover_image,
            config.sample_cover_images[0]
        );
    }
}
