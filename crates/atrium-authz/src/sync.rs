//! Event-driven permission resynchronization.
//!
//! When a profile definition changes remotely, every execution context has
//! to refresh its cached permissions. The sync service subscribes to the
//! bus, and on `ProfileChanged` refetches the *current* session's profile
//! (not necessarily the changed one — an admin editing profile B must not
//! stop the sidebar from refreshing for a user on profile A whose grants
//! reference shared routines).
//!
//! # Two-phase broadcast
//!
//! After a successful fetch the service writes the snapshot through
//! [`PermissionStore::save`] and only then publishes `PermissionsUpdated`
//! followed by `PermissionsReloaded`. The write acknowledgement (the save
//! returning) is what sequences the phases; consumers that reload from the
//! store on `PermissionsReloaded` can never observe the pre-write blob.
//! The original portal sequenced this with a fixed timer instead; keying on
//! the write removes the wall-clock dependency.

use std::sync::Arc;

use atrium_core::{Notification, Notifier, Result};

use crate::bus::PermissionEventBus;
use crate::event::{AuthorizationEvent, EventKind};
use crate::lookup::ProfileLookup;
use crate::snapshot::PermissionSnapshot;
use crate::store::PermissionStore;

/// Keeps the permission store in sync with the profile service.
pub struct PermissionsSyncService {
    bus: PermissionEventBus,
    store: PermissionStore,
    lookup: Arc<dyn ProfileLookup>,
    notifier: Arc<dyn Notifier>,
}

impl PermissionsSyncService {
    /// Wire the service to its collaborators. Call [`run`](Self::run) to
    /// start reacting to events.
    pub fn new(
        bus: PermissionEventBus,
        store: PermissionStore,
        lookup: Arc<dyn ProfileLookup>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            bus,
            store,
            lookup,
            notifier,
        }
    }

    /// Subscribe to the bus and react to profile changes until the bus is
    /// dropped. Intended to be spawned at the composition root.
    pub async fn run(&self) {
        let mut subscription = self.bus.subscribe();
        while let Some(event) = subscription.recv().await {
            if let EventKind::ProfileChanged { profile, change } = &event.kind {
                log::info!("profile '{profile}' {change}, resynchronizing permissions");
                self.sync_now().await;
            }
        }
        log::debug!("permission sync loop stopped: bus closed");
    }

    /// Run one sync pass immediately (force-sync entry point).
    ///
    /// Failures are reported through the notifier and leave the existing
    /// snapshot untouched; there is no automatic retry. A pending pass is
    /// not cancellable — a superseding event simply runs another pass and
    /// the last write wins.
    pub async fn sync_now(&self) {
        if let Err(e) = self.sync_pass().await {
            log::warn!("permission sync failed: {e}");
            self.notifier.notify(Notification::warning(
                "Permissions not refreshed",
                format!("Could not refresh your permissions: {e}. Your previous permissions remain in effect."),
            ));
        }
    }

    async fn sync_pass(&self) -> Result<()> {
        let (user, profile) = match self.store.active_session()? {
            Some(session) => session,
            None => {
                log::debug!("skipping permission sync: no active session");
                return Ok(());
            }
        };

        let fetched = self.lookup.permissions_for(&profile).await?;
        let active: Vec<_> = fetched.into_iter().filter(|p| p.active).collect();
        log::debug!(
            "fetched {} active permissions for profile '{profile}'",
            active.len()
        );

        let snapshot = PermissionSnapshot::new(user, profile, active);
        self.store.save(snapshot)?;

        // The save above is the write acknowledgement; both phases go out
        // only after the snapshot is durable.
        self.bus
            .publish(AuthorizationEvent::now(EventKind::PermissionsUpdated));
        self.bus
            .publish(AuthorizationEvent::now(EventKind::PermissionsReloaded));
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
