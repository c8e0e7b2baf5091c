//! Application session entities.

pub mod identity;
pub mod model;
pub mod settings;

pub use identity::CreatorIdentity;
pub use model::{AppSession, Profile, SessionUser};
pub use settings::{Settings, ViewMode};
