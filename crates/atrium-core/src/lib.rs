//! # atrium-core
//!
//! Shared foundation for the Atrium portal's authorization crates.
//! It has no internal Atrium dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`storage`]: Durable key-value storage seam (filesystem and in-memory)
//! - [`notify`]: User-facing notification seam

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod notify;
pub mod storage;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use notify::{Notification, Notifier, Severity};
pub use storage::KeyValueStorage;
