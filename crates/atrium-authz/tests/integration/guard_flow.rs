//! The navigation guard is orthogonal to the permission cache.

use std::sync::Arc;

use atrium_authz::{AccessKind, PermissionRef};
use atrium_authz::lookup::StaticProfileLookup;
use atrium_authz::ProfileId;
use atrium_nav::{GuardDecision, NavigationGuard};

use crate::common::{grant, TestHarness};

/// A navigation without the intent mark is redirected no matter how
/// privileged the user is; the guard never reads the permission store.
#[tokio::test]
async fn test_guard_denies_deep_link_regardless_of_permissions() {
    let harness = TestHarness::new();
    let service = harness.sync_service(Arc::new(
        StaticProfileLookup::new().with_profile(
            ProfileId::new("p1"),
            AccessKind::ALL
                .iter()
                .map(|kind| grant("Perfis", *kind))
                .collect(),
        ),
    ));
    service.sync_now().await;

    // Fully privileged on the routine...
    let query = harness.query();
    assert!(query.can_view(&PermissionRef::by_id("perfis")));
    assert!(query.can_delete(&PermissionRef::by_id("perfis")));

    // ...yet a deep link is still redirected.
    let guard = NavigationGuard::new("/unauthorized");
    assert_eq!(
        guard.evaluate("/config/perfis"),
        GuardDecision::RedirectDeny {
            target: "/unauthorized".to_string()
        }
    );

    // An in-app menu click authorizes exactly one transition.
    guard.mark_intentional();
    assert_eq!(guard.evaluate("/config/perfis"), GuardDecision::Allow);
}

/// The converse: intent allows navigation even with no permissions loaded.
#[tokio::test]
async fn test_guard_allows_marked_navigation_without_permissions() {
    let harness = TestHarness::new();
    assert!(harness.store.snapshot().is_none());

    let guard = NavigationGuard::new("/unauthorized");
    guard.mark_intentional();
    assert_eq!(guard.evaluate("/home"), GuardDecision::Allow);
}
