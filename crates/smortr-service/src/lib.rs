//! # smortr-service
//!
//! Business logic service layer for Smortr. The folder tree arranges
//! staged files before submission; the project service creates the
//! project record and attaches every staged file on a best-effort basis;
//! the session store loads and saves the application session at process
//! boundaries.
//!
//! Services follow constructor injection: the remote collaborators are
//! provided at construction time via `Arc` references.

pub mod folder;
pub mod project;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use folder::{DragState, DragTransition, FileTree, TreeRow};
pub use project::{CreatedProject, FileUploader, ProjectService, UploadFailure, UploadOutcome};
pub use session::SessionStore;
