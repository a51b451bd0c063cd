//! Intentional-transition route guard.
//!
//! Gates route activation on whether the transition was explicitly
//! initiated inside the app (a successful login, a menu click). Deep
//! links, back/forward history, and page refreshes carry no such intent
//! and are redirected to the unauthorized-access screen.
//!
//! This is a transition-intent verifier, not a permission checkpoint: the
//! guard never consults the permission store, and a fully privileged user
//! arriving via a deep link is denied all the same.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Guard state between navigation attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// No in-app action has authorized the next transition.
    #[default]
    Unchecked,
    /// The next transition was initiated by an in-app action.
    Intentional,
}

impl fmt::Display for GuardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardState::Unchecked => write!(f, "unchecked"),
            GuardState::Intentional => write!(f, "intentional"),
        }
    }
}

/// Outcome of evaluating one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Let the navigation proceed.
    Allow,
    /// Cancel the navigation and redirect.
    RedirectDeny {
        /// Route of the unauthorized-access screen.
        target: String,
    },
}

/// Two-state navigation guard with consume-on-evaluate semantics.
///
/// Cheap to clone; clones share the intent flag, so the action handler
/// that marks intent and the router hook that evaluates it can hold
/// separate handles.
#[derive(Clone)]
pub struct NavigationGuard {
    inner: Arc<GuardInner>,
}

struct GuardInner {
    unauthorized_route: String,
    state: Mutex<GuardState>,
}

impl NavigationGuard {
    /// Create a guard that denies toward the given unauthorized route.
    pub fn new(unauthorized_route: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                unauthorized_route: unauthorized_route.into(),
                state: Mutex::new(GuardState::Unchecked),
            }),
        }
    }

    /// Mark the next navigation as intentionally initiated in-app.
    ///
    /// Called by the handful of actions that legitimately start a
    /// transition; the mark covers exactly one evaluation.
    pub fn mark_intentional(&self) {
        *self.inner.state.lock().expect("guard state poisoned") = GuardState::Intentional;
    }

    /// Current state, for diagnostics.
    pub fn state(&self) -> GuardState {
        *self.inner.state.lock().expect("guard state poisoned")
    }

    /// Evaluate a navigation attempt toward `route`.
    ///
    /// Allows iff the intent flag is set on this attempt; the flag is
    /// consumed either way, so history navigation and refreshes that replay
    /// a route never inherit an earlier mark.
    pub fn evaluate(&self, route: &str) -> GuardDecision {
        let mut state = self.inner.state.lock().expect("guard state poisoned");
        let decision = match *state {
            GuardState::Intentional => GuardDecision::Allow,
            GuardState::Unchecked => {
                log::info!(
                    "navigation to '{route}' lacked in-app intent, redirecting to '{}'",
                    self.inner.unauthorized_route
                );
                GuardDecision::RedirectDeny {
                    target: self.inner.unauthorized_route.clone(),
                }
            }
        };
        *state = GuardState::Unchecked;
        decision
    }
}

// ============================================================================
// Tests
// ============================================================================
