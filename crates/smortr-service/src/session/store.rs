//! Loads and saves the application session as a JSON file.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use smortr_core::config::SessionConfig;
use smortr_core::error::{AppError, ErrorKind};
use smortr_core::result::AppResult;
use smortr_entity::session::{AppSession, Profile, SessionUser, Settings};

/// Reads and writes the session at process boundaries.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store for the configured session file.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            path: PathBuf::from(&config.path),
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, returning a signed-out default if none was saved.
    pub async fn load(&self) -> AppResult<AppSession> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved session");
                return Ok(AppSession::default());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Session,
                    format!("Failed to read session: {}", self.path.display()),
                    e,
                ));
            }
        };
        serde_json::from_slice(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Session,
                format!("Corrupt session file: {}", self.path.display()),
                e,
            )
        })
    }

    /// Persist `session`, replacing any previous one.
    pub async fn save(&self, session: &AppSession) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).await.map_err(|e| {
            AppError::with_source(ErrorKind::Session, "Failed to write session", e)
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Session, "Failed to replace session", e)
        })?;
        Ok(())
    }

    /// Record a signed-in account, keeping existing settings.
    pub async fn sign_in(&self, user: SessionUser, profile: Profile) -> AppResult<AppSession> {
        if user.id != profile.id {
            return Err(AppError::validation("Profile does not belong to the user"));
        }
        let mut session = self.load().await?;
        info!(user_id = %user.id, email = %user.email, "Signed in");
        session.user = Some(user);
        session.profile = Some(profile);
        self.save(&session).await?;
        Ok(session)
    }

    /// Clear the account and restore default settings.
    pub async fn sign_out(&self) -> AppResult<()> {
        self.save(&AppSession::default()).await?;
        info!("Signed out");
        Ok(())
    }

    /// Replace the saved preferences.
    pub async fn update_settings(&self, settings: Settings) -> AppResult<AppSession> {
        let mut session = self.load().await?;
        session.settings = settings;
        self.save(&session).await?;
        Ok(session)
    }
}
