//! # smortr-storage
//!
//! The remote collaborators a project submission talks to: an object
//! store for file bytes and a project index for project and file
//! metadata records. Both ship with local implementations backed by the
//! configured data root.

pub mod index;
pub mod providers;

pub use index::{JsonProjectIndex, ProjectIndex};
pub use providers::LocalObjectStorage;
