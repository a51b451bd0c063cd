//! Error types for the Atrium authorization crates.

use std::path::Path;
use thiserror::Error;

/// Result type alias for Atrium operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the authorization subsystem.
///
/// None of these are fatal to callers of the query surface: the query layer
/// converts every failure into a deny and reports through the notifier.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O failure against durable storage.
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path or logical key involved.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A durable blob was present but could not be parsed.
    ///
    /// Handled by clearing the blob and treating it as absent.
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// A stored snapshot belongs to a different (user, profile) pair.
    ///
    /// Treated identically to absence; forces a fresh fetch.
    #[error("Snapshot owner mismatch: stored ({stored_user}, {stored_profile}), active ({active_user}, {active_profile})")]
    OwnerMismatch {
        /// Owner recorded in the stored snapshot.
        stored_user: String,
        /// Profile recorded in the stored snapshot.
        stored_profile: String,
        /// User of the active session.
        active_user: String,
        /// Profile of the active session.
        active_profile: String,
    },

    /// The profile-lookup collaborator failed or reported no success.
    ///
    /// The existing (possibly stale) snapshot is left untouched.
    #[error("Permission fetch failed: {0}")]
    Fetch(String),

    /// Generic operation failure.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Create an I/O error tagged with the path it occurred at.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an I/O error tagged with a logical storage key.
    pub fn io_with_key(source: std::io::Error, key: &str) -> Self {
        Self::Io {
            path: key.to_string(),
            source,
        }
    }

    /// Create a corrupt-value error.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::Corrupt(msg.into())
    }

    /// Create a fetch-failure error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a generic operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }
}
