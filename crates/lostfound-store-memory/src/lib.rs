//! In-memory backend for the Lost & Found post store.
//!
//! Holds the newest-first collection behind an async `RwLock`; every
//! operation completes under a single lock acquisition.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
