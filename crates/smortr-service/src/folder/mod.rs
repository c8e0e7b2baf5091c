//! Folder tree interaction: expansion, folder creation, file staging, drag and drop.

pub mod drag;
pub mod tree;

pub use drag::{DragState, DragTransition};
pub use tree::{FileTree, TreeRow};
