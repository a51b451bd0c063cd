//! Authorization-change notification events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ProfileId;

/// What happened to a profile, as reported by the profile admin screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileChange {
    /// A profile was created.
    Created,
    /// A profile's grants were modified.
    Updated,
    /// A profile was deleted.
    Deleted,
}

impl std::fmt::Display for ProfileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileChange::Created => write!(f, "created"),
            ProfileChange::Updated => write!(f, "updated"),
            ProfileChange::Deleted => write!(f, "deleted"),
        }
    }
}

/// Kind of authorization event carried on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum EventKind {
    /// The permission snapshot was rewritten; payload is already durable.
    PermissionsUpdated,
    /// Consumers should reload from the store (published strictly after
    /// the snapshot write has been acknowledged).
    PermissionsReloaded,
    /// A profile definition changed remotely; the sync service reacts.
    ProfileChanged {
        /// Profile the change was reported for. The sync service refetches
        /// the *current* session's profile, which may differ.
        profile: ProfileId,
        /// What happened to it.
        change: ProfileChange,
    },
}

/// A single authorization-change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationEvent {
    /// What happened.
    pub kind: EventKind,
    /// When the event was published.
    pub timestamp: DateTime<Utc>,
}

impl AuthorizationEvent {
    /// Build an event stamped with the current time.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Convenience constructor for a profile-change event.
    pub fn profile_changed(profile: ProfileId, change: ProfileChange) -> Self {
        Self::now(EventKind::ProfileChanged { profile, change })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_change_display() {
        assert_eq!(ProfileChange::Created.to_string(), "created");
        assert_eq!(ProfileChange::Updated.to_string(), "updated");
        assert_eq!(ProfileChange::Deleted.to_string(), "deleted");
    }

    #[test]
    fn test_event_construction() {
        let event = AuthorizationEvent::profile_changed(
            ProfileId::new("admin"),
            ProfileChange::Updated,
        );
        match &event.kind {
            EventKind::ProfileChanged { profile, change } => {
                assert_eq!(profile.as_str(), "admin");
                assert_eq!(*change, ProfileChange::Updated);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_event_serialization_roundtrip() {
        let event = AuthorizationEvent::now(EventKind::PermissionsUpdated);
        let json = serde_json::to_string(&event).unwrap();
        let restored: AuthorizationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, event);
    }
}
