//! Folder domain entities.

pub mod path;
pub mod tree;

pub use path::FolderPath;
pub use tree::{FolderId, FolderNode, FolderTree};
