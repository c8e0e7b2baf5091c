//! Project creation and file attachment.

pub mod service;
pub mod upload;

pub use service::{CreatedProject, ProjectService};
pub use upload::{FileUploader, UploadFailure, UploadOutcome};
