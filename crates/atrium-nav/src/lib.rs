//! # atrium-nav
//!
//! The navigation-intent guard. Orthogonal to the permission subsystem:
//! it verifies that a route transition was initiated by an in-app action,
//! not what the user is allowed to see once there.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod guard;

pub use guard::{GuardDecision, GuardState, NavigationGuard};
