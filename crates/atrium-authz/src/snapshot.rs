//! Cached permission snapshot and staleness windows.
//!
//! A snapshot is the unit persisted to durable storage: the active
//! permissions of one (user, profile) pair, stamped with the fetch time and
//! a schema version. A stored blob with a different schema version is
//! treated the same as a corrupt one.
//!
//! # Staleness windows
//!
//! - under 1 hour: fully fresh
//! - between 1 and 24 hours: usable, flagged "needs update" (soft)
//! - over 24 hours: treated as absent (hard)

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Permission, ProfileId, UserId};

/// Current snapshot schema version. Bumped when the blob layout changes.
pub const SCHEMA_VERSION: u32 = 2;

/// Soft staleness threshold.
const SOFT_EXPIRY_HOURS: i64 = 1;

/// Hard staleness threshold.
const HARD_EXPIRY_HOURS: i64 = 24;

/// Degree of staleness of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Younger than the soft threshold.
    Fresh,
    /// Usable but flagged for refresh (older than 1 h, younger than 24 h).
    Soft,
    /// Expired; treated as absent (older than 24 h).
    Hard,
}

/// The cached, timestamped copy of a profile's active permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionSnapshot {
    /// User the snapshot was fetched for.
    pub owner_user_id: UserId,
    /// Profile the snapshot was fetched for.
    pub profile_id: ProfileId,
    /// Active permission grants.
    pub permissions: Vec<Permission>,
    /// When the snapshot was fetched (RFC 3339 over the wire).
    pub last_updated: DateTime<Utc>,
    /// Blob layout version.
    pub schema_version: u32,
}

impl PermissionSnapshot {
    /// Create a snapshot stamped with the current time.
    pub fn new(owner: UserId, profile: ProfileId, permissions: Vec<Permission>) -> Self {
        Self {
            owner_user_id: owner,
            profile_id: profile,
            permissions,
            last_updated: Utc::now(),
            schema_version: SCHEMA_VERSION,
        }
    }

    /// Age of the snapshot relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.last_updated)
    }

    /// Staleness classification relative to `now`.
    ///
    /// A timestamp in the future (clock skew) is treated as fresh.
    pub fn staleness(&self, now: DateTime<Utc>) -> Staleness {
        let age = self.age(now);
        if age > Duration::hours(HARD_EXPIRY_HOURS) {
            Staleness::Hard
        } else if age > Duration::hours(SOFT_EXPIRY_HOURS) {
            Staleness::Soft
        } else {
            Staleness::Fresh
        }
    }

    /// `true` if the snapshot belongs to the given (user, profile) pair.
    pub fn owned_by(&self, user: &UserId, profile: &ProfileId) -> bool {
        self.owner_user_id == *user && self.profile_id == *profile
    }

    /// `true` if the snapshot holds no permissions at all.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
