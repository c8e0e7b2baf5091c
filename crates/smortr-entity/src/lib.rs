//! # smortr-entity
//!
//! Domain entity models for Smortr. Records mirror the rows held by the
//! remote project index; the remaining types are in-memory value objects
//! used while a project is being drafted. All entities derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize` where they cross a boundary.

pub mod file;
pub mod folder;
pub mod project;
pub mod session;
