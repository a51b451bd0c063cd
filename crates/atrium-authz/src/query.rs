//! Authorization query surface consumed by screens and toolbars.
//!
//! Queries never fail: every problem degrades to a deny (`false`), with a
//! user-visible warning through the notifier when a by-name lookup finds
//! nothing. The fast path resolves an opaque routine id directly against
//! the store; the slow path scans by human-readable names.

use std::sync::Arc;

use atrium_core::{Notification, Notifier};

use crate::store::PermissionStore;
use crate::types::{AccessKind, RoutineId};

/// How a capability is referred to in a query.
///
/// Screens generated from the routine registry hold opaque ids; hand-written
/// screens and toolbar configs refer to routines by display name, sometimes
/// with a module hint to disambiguate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRef {
    /// Opaque routine id; matched against the grant's (routine id,
    /// access id) pair.
    ById(RoutineId),
    /// Human-readable routine name with an optional module hint; matched
    /// by linear scan over routine name, access-type name, and module.
    ByName {
        /// Routine display name (e.g. "Perfis").
        routine: String,
        /// Module the routine belongs to, when known.
        module: Option<String>,
    },
}

impl PermissionRef {
    /// Reference a routine by its opaque id.
    pub fn by_id(id: impl Into<RoutineId>) -> Self {
        Self::ById(id.into())
    }

    /// Reference a routine by display name.
    pub fn by_name(routine: impl Into<String>) -> Self {
        Self::ByName {
            routine: routine.into(),
            module: None,
        }
    }

    /// Reference a routine by display name within a specific module.
    pub fn by_name_in(routine: impl Into<String>, module: impl Into<String>) -> Self {
        Self::ByName {
            routine: routine.into(),
            module: Some(module.into()),
        }
    }
}

/// The `canView/canCreate/canEdit/canDelete` surface.
///
/// Cheap to clone; owns shared handles to the store and the notifier.
#[derive(Clone)]
pub struct AuthorizationQuery {
    store: PermissionStore,
    notifier: Arc<dyn Notifier>,
}

impl AuthorizationQuery {
    /// Create a query surface over the given store and notifier.
    pub fn new(store: PermissionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Can the user view the referenced routine?
    pub fn can_view(&self, permission: &PermissionRef) -> bool {
        self.check(permission, AccessKind::View)
    }

    /// Can the user create records in the referenced routine?
    pub fn can_create(&self, permission: &PermissionRef) -> bool {
        self.check(permission, AccessKind::Create)
    }

    /// Can the user edit records in the referenced routine?
    pub fn can_edit(&self, permission: &PermissionRef) -> bool {
        self.check(permission, AccessKind::Edit)
    }

    /// Can the user delete records in the referenced routine?
    pub fn can_delete(&self, permission: &PermissionRef) -> bool {
        self.check(permission, AccessKind::Delete)
    }

    /// Does the user hold any active grant on the referenced routine,
    /// regardless of access type?
    pub fn has_any_permission(&self, permission: &PermissionRef) -> bool {
        match permission {
            PermissionRef::ById(id) => self.store.has_any_permission(id.as_str()),
            PermissionRef::ByName { routine, .. } => self.store.has_any_permission(routine),
        }
    }

    /// `true` if at least one permission grant is loaded.
    ///
    /// Exposed for the menu engine's empty-set policy; everything else in
    /// this type denies on an empty set.
    pub fn any_permissions_loaded(&self) -> bool {
        self.store.any_permissions_loaded()
    }

    /// Silent capability check consumed by the menu engine.
    ///
    /// A capability (gate) name is opened by any active grant whose routine
    /// name it contains, ignoring case — a grant on "Perfis" opens the
    /// "Controle de Perfis" gate. Broader than the exact-name matching of
    /// the `can_*` slow path, and never raises a denial warning: the menu
    /// filter walks every gated node, interactive checks go through `can_*`
    /// so the user hears about the deny.
    pub fn holds_capability(&self, capability: &str, kind: AccessKind) -> bool {
        self.store
            .snapshot()
            .map(|s| {
                s.permissions
                    .iter()
                    .any(|p| p.authorizes_capability(capability, kind))
            })
            .unwrap_or(false)
    }

    fn check(&self, permission: &PermissionRef, kind: AccessKind) -> bool {
        match permission {
            PermissionRef::ById(id) => self.store.has_permission(id.as_str(), kind.access_id()),
            PermissionRef::ByName { routine, module } => {
                self.check_by_name(routine, module.as_deref(), kind)
            }
        }
    }

    fn check_by_name(&self, routine: &str, module: Option<&str>, kind: AccessKind) -> bool {
        let snapshot = match self.store.snapshot() {
            Some(snapshot) => snapshot,
            None => {
                let detail = format!(
                    "Cannot verify '{routine}': no permissions are loaded for this session."
                );
                log::debug!("by-name authorization denied: {detail}");
                self.notifier
                    .notify(Notification::warning("Access denied", detail));
                return false;
            }
        };

        if snapshot
            .permissions
            .iter()
            .any(|p| p.matches_names(routine, kind, module))
        {
            return true;
        }

        // Deny either way; the warning text distinguishes an unknown
        // routine name from a known routine the user lacks access to.
        let known_routine = snapshot.permissions.iter().any(|p| p.on_routine(routine));
        let detail = if known_routine {
            format!("You have no '{kind}' permission on '{routine}'.")
        } else {
            format!("No permission entry matches the name '{routine}'. Check the screen's capability configuration.")
        };
        log::debug!("by-name authorization denied: {detail}");
        self.notifier
            .notify(Notification::warning("Access denied", detail));
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
