//! Profile-lookup collaborator seam.
//!
//! The profile service owns role definitions; this subsystem only consumes
//! the permission list of a profile. Transport, auth headers, and retry
//! policy live with the collaborator, behind this trait.

use async_trait::async_trait;
use atrium_core::Result;

use crate::types::{Permission, ProfileId};

/// Fetches the permission grants of a profile.
///
/// An unsuccessful upstream response and a transport failure both surface
/// as [`atrium_core::Error::Fetch`]; the sync service treats them alike
/// (warn, keep the stale snapshot, no retry).
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Fetch all grants of `profile`, active and inactive.
    async fn permissions_for(&self, profile: &ProfileId) -> Result<Vec<Permission>>;
}

/// Lookup backed by a fixed in-memory table.
///
/// Useful for tests and for demo/offline contexts where profile
/// definitions are compiled in.
#[derive(Debug, Default)]
pub struct StaticProfileLookup {
    profiles: std::collections::HashMap<String, Vec<Permission>>,
}

impl StaticProfileLookup {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the grants of a profile, replacing any previous entry.
    pub fn with_profile(mut self, profile: ProfileId, permissions: Vec<Permission>) -> Self {
        self.profiles.insert(profile.as_str().to_string(), permissions);
        self
    }
}

#[async_trait]
impl ProfileLookup for StaticProfileLookup {
    async fn permissions_for(&self, profile: &ProfileId) -> Result<Vec<Permission>> {
        self.profiles
            .get(profile.as_str())
            .cloned()
            .ok_or_else(|| {
                atrium_core::Error::fetch(format!("unknown profile '{profile}'"))
            })
    }
}
