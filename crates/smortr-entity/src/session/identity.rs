//! Identity of the account creating a project.

use serde::{Deserialize, Serialize};

use smortr_core::error::AppError;
use smortr_core::result::AppResult;

/// The creator's account id and contact email, with the derived domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorIdentity {
    /// Account identifier.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// The text between the first `@` of `email` and the next `@`, if any.
    pub source_domain: String,
}

impl CreatorIdentity {
    /// Build an identity, deriving the source domain from `email`.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> AppResult<Self> {
        let id = id.into();
        let email = email.into();
        if id.trim().is_empty() {
            return Err(AppError::validation("Creator account id is required"));
        }
        let source_domain = email
            .split('@')
            .nth(1)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::validation(format!("Invalid creator email: '{email}'")))?
            .to_string();
        Ok(Self {
            id,
            email,
            source_domain,
        })
    }
}
