//! Integration tests for the profile-change sync flow.

use std::sync::Arc;

use atrium_authz::{
    AccessKind, AuthorizationEvent, EventKind, PermissionRef, PermissionSnapshot,
    ProfileChange, ProfileId, UserId,
};
use atrium_authz::lookup::StaticProfileLookup;

use crate::common::{grant, TestHarness};

/// A profile change ends with a subscriber seeing exactly Updated then
/// Reloaded, and the query surface reflecting the new permission set.
#[tokio::test]
async fn test_profile_change_runs_two_phase_broadcast() {
    let harness = TestHarness::new();
    let lookup = Arc::new(
        StaticProfileLookup::new()
            .with_profile(ProfileId::new("p1"), vec![grant("Perfis", AccessKind::View)]),
    );
    let service = harness.sync_service(lookup);
    let query = harness.query();

    // Pre-change state: nothing loaded, everything denied.
    assert!(!query.can_view(&PermissionRef::by_id("perfis")));

    // Subscriber watching for the fallout of the change.
    let mut sub = harness.bus.subscribe();

    harness.bus.publish(AuthorizationEvent::profile_changed(
        ProfileId::new("p1"),
        ProfileChange::Updated,
    ));
    // Drive one reaction directly rather than the unbounded run() loop
    // (the loop itself is covered below).
    service.sync_now().await;

    // The watcher sees the trigger, then exactly the two phases in order.
    assert!(matches!(
        sub.recv().await.unwrap().kind,
        EventKind::ProfileChanged { .. }
    ));
    assert_eq!(
        sub.recv().await.unwrap().kind,
        EventKind::PermissionsUpdated
    );
    assert_eq!(
        sub.recv().await.unwrap().kind,
        EventKind::PermissionsReloaded
    );
    assert_eq!(sub.try_recv(), None);

    // Query now reflects the post-change set, not the pre-change one.
    assert!(query.can_view(&PermissionRef::by_id("perfis")));
    assert!(harness.notifier.is_empty());
}

/// The service refetches the *current* session's profile even when the
/// changed profile is a different one.
#[tokio::test]
async fn test_sync_fetches_current_profile_not_changed_one() {
    let harness = TestHarness::new();
    let lookup = Arc::new(
        StaticProfileLookup::new()
            .with_profile(ProfileId::new("p1"), vec![grant("Perfis", AccessKind::View)])
            .with_profile(
                ProfileId::new("p2"),
                vec![grant("Financeiro", AccessKind::View)],
            ),
    );
    let service = harness.sync_service(lookup);

    // Someone edited profile p2; our session is on p1.
    harness.bus.publish(AuthorizationEvent::profile_changed(
        ProfileId::new("p2"),
        ProfileChange::Updated,
    ));
    service.sync_now().await;

    let snapshot = harness.store.snapshot().unwrap();
    assert_eq!(snapshot.profile_id, ProfileId::new("p1"));
    assert_eq!(snapshot.permissions[0].routine_name, "Perfis");
}

/// run() reacts to a ProfileChanged event delivered through the bus.
#[tokio::test]
async fn test_run_loop_reacts_to_profile_changed() {
    let harness = TestHarness::new();
    let lookup = Arc::new(
        StaticProfileLookup::new()
            .with_profile(ProfileId::new("p1"), vec![grant("Perfis", AccessKind::View)]),
    );
    let service = Arc::new(harness.sync_service(lookup));

    let runner = {
        let service = service.clone();
        tokio::spawn(async move { service.run().await })
    };

    let mut sub = harness.bus.subscribe();
    harness.bus.publish(AuthorizationEvent::profile_changed(
        ProfileId::new("p1"),
        ProfileChange::Created,
    ));

    // Wait for the two phases the loop must produce.
    let mut kinds = Vec::new();
    while kinds.len() < 3 {
        match sub.recv().await {
            Some(event) => kinds.push(event.kind),
            None => break,
        }
    }
    assert!(matches!(kinds[0], EventKind::ProfileChanged { .. }));
    assert_eq!(kinds[1], EventKind::PermissionsUpdated);
    assert_eq!(kinds[2], EventKind::PermissionsReloaded);
    assert!(harness.store.has_permission("perfis", "view"));

    runner.abort();
}

/// A superseding change simply runs another pass; the last write wins.
#[tokio::test]
async fn test_superseding_sync_last_write_wins() {
    let harness = TestHarness::new();
    let service_v1 = harness.sync_service(Arc::new(
        StaticProfileLookup::new()
            .with_profile(ProfileId::new("p1"), vec![grant("Perfis", AccessKind::View)]),
    ));
    let service_v2 = harness.sync_service(Arc::new(
        StaticProfileLookup::new().with_profile(
            ProfileId::new("p1"),
            vec![
                grant("Perfis", AccessKind::View),
                grant("Acessos", AccessKind::View),
            ],
        ),
    ));

    service_v1.sync_now().await;
    service_v2.sync_now().await;

    let snapshot = harness.store.snapshot().unwrap();
    assert_eq!(snapshot.permissions.len(), 2);
}

/// A restored snapshot from a previous run survives until the next sync.
#[tokio::test]
async fn test_restored_snapshot_replaced_wholesale_on_sync() {
    let harness = TestHarness::new();
    harness
        .store
        .save(PermissionSnapshot::new(
            UserId::new("u1"),
            ProfileId::new("p1"),
            vec![grant("Financeiro", AccessKind::View)],
        ))
        .unwrap();

    let service = harness.sync_service(Arc::new(
        StaticProfileLookup::new()
            .with_profile(ProfileId::new("p1"), vec![grant("Perfis", AccessKind::View)]),
    ));
    service.sync_now().await;

    // Replacement, not merge.
    let snapshot = harness.store.snapshot().unwrap();
    assert_eq!(snapshot.permissions.len(), 1);
    assert_eq!(snapshot.permissions[0].routine_name, "Perfis");
}
