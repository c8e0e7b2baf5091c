//! # smortr-core
//!
//! Core crate for Smortr. Contains configuration schemas, typed
//! identifiers, transfer progress types, the object storage trait,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Smortr crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
