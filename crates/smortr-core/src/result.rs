//! Convenience result type alias for Smortr.

use crate::error::AppError;

/// A specialized `Result` type for Smortr operations.
pub type AppResult<T> = Result<T, AppError>;
