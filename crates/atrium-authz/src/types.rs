//! Identifier and permission grant types.
//!
//! Ids are server-assigned opaque strings; equality for authorization
//! purposes is case-insensitive throughout (the profile service has
//! historically been inconsistent about casing).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Case-insensitive string comparison used for all id and name matching.
///
/// Unicode-aware: routine and module names carry accented characters
/// ("Configurações") that ASCII folding would miss.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new id from a string.
            pub fn new<S: Into<String>>(id: S) -> Self {
                Self(id.into())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Case-insensitive equality against a raw string.
            pub fn matches(&self, other: &str) -> bool {
                eq_ignore_case(&self.0, other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id! {
    /// Unique identifier for a portal user.
    UserId
}

string_id! {
    /// Unique identifier for a permission profile (role).
    ProfileId
}

string_id! {
    /// Unique identifier for a routine (a named functional area, e.g. "Perfis").
    RoutineId
}

string_id! {
    /// Unique identifier for an access type on a routine.
    AccessId
}

// ============================================================================
// AccessKind
// ============================================================================

/// The four capability kinds a routine can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessKind {
    /// Read/view access.
    View,
    /// Record creation.
    Create,
    /// Record modification.
    Edit,
    /// Record removal.
    Delete,
}

impl AccessKind {
    /// All kinds, in display order.
    pub const ALL: [AccessKind; 4] = [
        AccessKind::View,
        AccessKind::Create,
        AccessKind::Edit,
        AccessKind::Delete,
    ];

    /// Stable access id used for the fast query path.
    pub fn access_id(&self) -> &'static str {
        match self {
            AccessKind::View => "view",
            AccessKind::Create => "create",
            AccessKind::Edit => "edit",
            AccessKind::Delete => "delete",
        }
    }

    /// Human-readable labels accepted on the slow (by-name) query path.
    ///
    /// The profile service ships Portuguese access-type names; the English
    /// kind names are accepted as well. Matching is case-insensitive.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            AccessKind::View => &["visualização", "view"],
            AccessKind::Create => &["inclusão", "create"],
            AccessKind::Edit => &["alteração", "edit"],
            AccessKind::Delete => &["exclusão", "delete"],
        }
    }

    /// `true` if `name` is one of this kind's labels, ignoring case.
    pub fn matches_label(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.labels().iter().any(|l| *l == lowered)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.access_id())
    }
}

// ============================================================================
// Permission
// ============================================================================

/// A single (routine × access-type) grant from a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Id of the access type granted.
    pub access_id: AccessId,
    /// Id of the routine the grant applies to.
    pub routine_id: RoutineId,
    /// Human-readable routine name (e.g. "Perfis").
    pub routine_name: String,
    /// Human-readable access-type name (e.g. "Visualização").
    pub access_name: String,
    /// Module the routine belongs to (e.g. "Configurações").
    pub module_name: String,
    /// Whether the grant is currently active. Inactive grants never match.
    pub active: bool,
}

impl Permission {
    /// Fast-path match on the (routine id, access id) pair.
    ///
    /// Case-insensitive; inactive grants never match.
    pub fn matches_ids(&self, routine_id: &str, access_id: &str) -> bool {
        self.active && self.routine_id.matches(routine_id) && self.access_id.matches(access_id)
    }

    /// Slow-path match on routine name, access kind, and optional module hint.
    ///
    /// All comparisons are case-insensitive; inactive grants never match.
    pub fn matches_names(&self, routine: &str, kind: AccessKind, module: Option<&str>) -> bool {
        if !self.active {
            return false;
        }
        if !eq_ignore_case(&self.routine_name, routine) {
            return false;
        }
        if !kind.matches_label(&self.access_name) {
            return false;
        }
        match module {
            Some(m) => eq_ignore_case(&self.module_name, m),
            None => true,
        }
    }

    /// `true` if this grant is on the named routine (by name or id), active only.
    pub fn on_routine(&self, routine: &str) -> bool {
        self.active && (eq_ignore_case(&self.routine_name, routine) || self.routine_id.matches(routine))
    }

    /// Menu-gate match: `true` if this grant opens the named capability.
    ///
    /// A capability name is satisfied by a grant whose routine name it
    /// *contains*, ignoring case: a grant on "Perfis" opens the
    /// "Controle de Perfis" gate. Inactive grants never match.
    pub fn authorizes_capability(&self, capability: &str, kind: AccessKind) -> bool {
        self.active
            && kind.matches_label(&self.access_name)
            && capability
                .to_lowercase()
                .contains(&self.routine_name.to_lowercase())
    }
}

// ============================================================================
// Tests
// ============================================================================
