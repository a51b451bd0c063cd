//! Durable + in-memory permission cache.
//!
//! The store is the single owner of the cached [`PermissionSnapshot`]. It
//! is constructed once at the composition root and handed to every
//! consumer; there is no ambient global state.
//!
//! Fail-safe default is deny: with no snapshot loaded, or an empty
//! permission list, every query answers `false`.
//!
//! Session identity (current user id, current profile id) lives in the same
//! durable storage under fixed keys, next to the snapshot blob. A stored
//! snapshot is only valid for the exact (user, profile) pair it was created
//! for; any mismatch is treated as absence.

use std::sync::{Arc, RwLock};

use chrono::Utc;

use atrium_core::storage::{
    KeyValueStorage, KEY_CURRENT_PROFILE, KEY_CURRENT_USER, KEY_PERMISSION_SNAPSHOT,
};
use atrium_core::{Error, Result};

use crate::snapshot::{PermissionSnapshot, Staleness, SCHEMA_VERSION};
use crate::types::{ProfileId, UserId};

/// Client-side cache of the active user's permissions.
///
/// Cheap to clone (Arc internals); all clones share the same mirror and
/// durable backend.
#[derive(Clone)]
pub struct PermissionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    storage: Arc<dyn KeyValueStorage>,
    mirror: RwLock<Option<PermissionSnapshot>>,
}

impl PermissionStore {
    /// Create a store over the given durable backend. The mirror starts
    /// empty; call [`load`](Self::load) to restore a persisted snapshot.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                storage,
                mirror: RwLock::new(None),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Session identity
    // ------------------------------------------------------------------

    /// Record the authenticated session in durable storage.
    pub fn set_session(&self, user: &UserId, profile: &ProfileId) -> Result<()> {
        self.inner.storage.write(KEY_CURRENT_USER, user.as_str())?;
        self.inner
            .storage
            .write(KEY_CURRENT_PROFILE, profile.as_str())
    }

    /// The active (user, profile) pair, or `None` when not logged in.
    pub fn active_session(&self) -> Result<Option<(UserId, ProfileId)>> {
        let user = self.inner.storage.read(KEY_CURRENT_USER)?;
        let profile = self.inner.storage.read(KEY_CURRENT_PROFILE)?;
        Ok(match (user, profile) {
            (Some(u), Some(p)) => Some((UserId::new(u), ProfileId::new(p))),
            _ => None,
        })
    }

    /// Drop the session keys and the cached snapshot (logout).
    pub fn clear_session(&self) -> Result<()> {
        self.inner.storage.remove(KEY_CURRENT_USER)?;
        self.inner.storage.remove(KEY_CURRENT_PROFILE)?;
        self.clear()
    }

    // ------------------------------------------------------------------
    // Snapshot lifecycle
    // ------------------------------------------------------------------

    /// Restore the snapshot from durable storage into the mirror.
    ///
    /// Returns `None` when the blob is absent, unparsable (the blob is
    /// removed as a side effect; a corrupt value never surfaces), written
    /// under a different schema version, owned by a different (user,
    /// profile) pair, hard-expired, or when there is no active session to
    /// validate ownership against. The mirror always ends up matching the
    /// returned value.
    pub fn load(&self) -> Result<Option<PermissionSnapshot>> {
        let blob = match self.inner.storage.read(KEY_PERMISSION_SNAPSHOT)? {
            Some(blob) => blob,
            None => {
                self.set_mirror(None);
                return Ok(None);
            }
        };

        let snapshot: PermissionSnapshot = match serde_json::from_str(&blob) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // Silent self-heal: clear the corrupt blob, report absence.
                log::warn!("discarding corrupt permission snapshot: {e}");
                self.inner.storage.remove(KEY_PERMISSION_SNAPSHOT)?;
                self.set_mirror(None);
                return Ok(None);
            }
        };

        if snapshot.schema_version != SCHEMA_VERSION {
            log::warn!(
                "discarding permission snapshot with schema {} (current {})",
                snapshot.schema_version,
                SCHEMA_VERSION
            );
            self.inner.storage.remove(KEY_PERMISSION_SNAPSHOT)?;
            self.set_mirror(None);
            return Ok(None);
        }

        match self.active_session()? {
            Some((user, profile)) if snapshot.owned_by(&user, &profile) => {}
            Some((user, profile)) => {
                log::info!(
                    "stored snapshot owner ({}, {}) does not match session ({user}, {profile}), forcing reload",
                    snapshot.owner_user_id,
                    snapshot.profile_id,
                );
                self.inner.storage.remove(KEY_PERMISSION_SNAPSHOT)?;
                self.set_mirror(None);
                return Ok(None);
            }
            None => {
                // No authenticated session; a snapshot without an owner to
                // validate against is never served.
                log::debug!("stored snapshot present but no active session, ignoring");
                self.set_mirror(None);
                return Ok(None);
            }
        }

        if snapshot.staleness(Utc::now()) == Staleness::Hard {
            log::info!("stored snapshot is hard-expired, treating as absent");
            self.set_mirror(None);
            return Ok(None);
        }

        self.set_mirror(Some(snapshot.clone()));
        Ok(Some(snapshot))
    }

    /// Persist `snapshot` and replace the mirror with it.
    pub fn save(&self, snapshot: PermissionSnapshot) -> Result<()> {
        let blob = serde_json::to_string(&snapshot)
            .map_err(|e| Error::operation(format!("failed to serialize snapshot: {e}")))?;
        self.inner.storage.write(KEY_PERMISSION_SNAPSHOT, &blob)?;
        self.set_mirror(Some(snapshot));
        Ok(())
    }

    /// Drop the mirror and remove the durable blob.
    pub fn clear(&self) -> Result<()> {
        self.set_mirror(None);
        self.inner.storage.remove(KEY_PERMISSION_SNAPSHOT)
    }

    /// `true` if the mirrored snapshot is at least `threshold` stale.
    ///
    /// With no snapshot loaded this returns `true` for both thresholds:
    /// absent data always needs an update.
    pub fn is_stale(&self, threshold: Staleness) -> bool {
        let mirror = self.read_mirror();
        match mirror.as_ref() {
            None => true,
            Some(snapshot) => match (snapshot.staleness(Utc::now()), threshold) {
                (Staleness::Hard, _) => true,
                (Staleness::Soft, Staleness::Soft) => true,
                _ => false,
            },
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// `true` if an active grant matches the (routine id, access id) pair,
    /// case-insensitively. Empty or absent mirror answers `false`.
    pub fn has_permission(&self, routine_id: &str, access_id: &str) -> bool {
        self.read_mirror()
            .as_ref()
            .map(|s| {
                s.permissions
                    .iter()
                    .any(|p| p.matches_ids(routine_id, access_id))
            })
            .unwrap_or(false)
    }

    /// `true` if any active grant exists on the routine (by id or name),
    /// regardless of access type.
    pub fn has_any_permission(&self, routine: &str) -> bool {
        self.read_mirror()
            .as_ref()
            .map(|s| s.permissions.iter().any(|p| p.on_routine(routine)))
            .unwrap_or(false)
    }

    /// A copy of the mirrored snapshot, if any.
    pub fn snapshot(&self) -> Option<PermissionSnapshot> {
        self.read_mirror().clone()
    }

    /// `true` if the mirror holds at least one permission grant.
    pub fn any_permissions_loaded(&self) -> bool {
        self.read_mirror()
            .as_ref()
            .map(|s| !s.is_empty())
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Mirror plumbing
    // ------------------------------------------------------------------

    fn read_mirror(&self) -> std::sync::RwLockReadGuard<'_, Option<PermissionSnapshot>> {
        self.inner.mirror.read().expect("permission mirror poisoned")
    }

    fn set_mirror(&self, value: Option<PermissionSnapshot>) {
        *self.inner.mirror.write().expect("permission mirror poisoned") = value;
    }
}

// ============================================================================
// Tests
// ============================================================================
