//! File domain entities.

pub mod handle;
pub mod model;
pub mod staged;

pub use handle::FileHandle;
pub use model::{CreateFileRecord, FileRecord};
pub use staged::StagedFile;
