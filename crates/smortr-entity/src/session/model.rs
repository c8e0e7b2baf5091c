//! The persisted application session.

use serde::{Deserialize, Serialize};

use smortr_core::error::AppError;
use smortr_core::result::AppResult;

use super::identity::CreatorIdentity;
use super::settings::Settings;

/// The authenticated account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Account identifier.
    pub id: String,
    /// Sign-in email.
    pub email: String,
}

/// Profile row of the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Account identifier.
    pub id: String,
    /// Contact email.
    pub email: Option<String>,
    /// Full name.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Company the account belongs to, once onboarded.
    #[serde(default)]
    pub company_id: Option<String>,
}

/// User, profile and preferences carried across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSession {
    /// Signed-in account.
    #[serde(default)]
    pub user: Option<SessionUser>,
    /// Profile of the signed-in account.
    #[serde(default)]
    pub profile: Option<Profile>,
    /// Preferences.
    #[serde(default)]
    pub settings: Settings,
}

impl AppSession {
    /// Whether an account is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Identity used to attribute new projects.
    pub fn identity(&self) -> AppResult<CreatorIdentity> {
        let profile = self
            .profile
            .as_ref()
            .ok_or_else(|| AppError::validation("No signed-in profile"))?;
        let email = profile
            .email
            .as_deref()
            .ok_or_else(|| AppError::validation("Profile has no contact email"))?;
        CreatorIdentity::new(profile.id.clone(), email)
    }
}
