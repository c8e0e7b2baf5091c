//! Project domain entities.

pub mod cover;
pub mod draft;
pub mod model;

pub use cover::CoverImage;
pub use draft::ProjectDraft;
pub use model::{CreateProjectRecord, ProjectRecord, UpdateProjectRecord};
