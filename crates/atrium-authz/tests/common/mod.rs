//! Common test utilities and harness for authorization integration tests.

use std::sync::Arc;

use atrium_authz::{
    AccessId, AccessKind, AuthorizationQuery, Permission, PermissionEventBus, PermissionStore,
    PermissionsSyncService, ProfileId, ProfileLookup, RoutineId, UserId,
};
use atrium_core::notify::RecordingNotifier;
use atrium_core::storage::MemoryStorage;

/// Test harness wiring a composition root out of mock collaborators.
pub struct TestHarness {
    /// Shared event bus.
    pub bus: PermissionEventBus,
    /// Permission store over in-memory storage, session already set.
    pub store: PermissionStore,
    /// The durable backend behind the store.
    pub storage: Arc<MemoryStorage>,
    /// Recording notifier for asserting surfaced warnings.
    pub notifier: Arc<RecordingNotifier>,
}

impl TestHarness {
    /// Create a harness with an authenticated session (`u1`, `p1`).
    pub fn new() -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let store = PermissionStore::new(storage.clone());
        store
            .set_session(&UserId::new("u1"), &ProfileId::new("p1"))
            .unwrap();
        Self {
            bus: PermissionEventBus::new(),
            store,
            storage,
            notifier: Arc::new(RecordingNotifier::new()),
        }
    }

    /// Build a sync service over this harness and the given lookup.
    pub fn sync_service(&self, lookup: Arc<dyn ProfileLookup>) -> PermissionsSyncService {
        PermissionsSyncService::new(
            self.bus.clone(),
            self.store.clone(),
            lookup,
            self.notifier.clone(),
        )
    }

    /// Build a query surface over this harness.
    pub fn query(&self) -> AuthorizationQuery {
        AuthorizationQuery::new(self.store.clone(), self.notifier.clone())
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// An active grant of `kind` on `routine`, in the Configurações module.
pub fn grant(routine: &str, kind: AccessKind) -> Permission {
    Permission {
        access_id: AccessId::new(kind.access_id()),
        routine_id: RoutineId::new(routine.to_lowercase()),
        routine_name: routine.to_string(),
        access_name: kind.labels()[0].to_string(),
        module_name: "Configurações".to_string(),
        active: true,
    }
}

/// Same as [`grant`] but toggled inactive.
pub fn inactive_grant(routine: &str, kind: AccessKind) -> Permission {
    Permission {
        active: false,
        ..grant(routine, kind)
    }
}
