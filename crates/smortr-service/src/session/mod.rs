//! Persisted application session.

pub mod store;

pub use store::SessionStore;
