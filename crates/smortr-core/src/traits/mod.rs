//! Core traits defined in `smortr-core` and implemented by other crates.

pub mod storage;

pub use storage::{ObjectStorage, ProgressFn, StoredObject};
