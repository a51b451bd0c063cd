//! # atrium-authz
//!
//! Authorization core for the Atrium portal: the client-side permission
//! cache, the event-driven invalidation mechanism that keeps independently
//! rendered UI regions (navigation, toolbars, route guards) consistent with
//! a remotely mutable profile, and the query surface screens consume.
//!
//! Dependency order, leaves first: [`store::PermissionStore`] and
//! [`bus::PermissionEventBus`] are independent leaves;
//! [`sync::PermissionsSyncService`] depends on both plus the
//! [`lookup::ProfileLookup`] collaborator; [`query::AuthorizationQuery`]
//! depends on the store only.
//!
//! Server-side enforcement is out of scope: the backend performs its own
//! authorization independently, this subsystem only decides what the UI
//! offers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bus;
pub mod event;
pub mod lookup;
pub mod query;
pub mod snapshot;
pub mod store;
pub mod sync;
pub mod types;

pub use atrium_core::{Error, Result};
pub use bus::{PermissionEventBus, Subscription};
pub use event::{AuthorizationEvent, EventKind, ProfileChange};
pub use lookup::ProfileLookup;
pub use query::{AuthorizationQuery, PermissionRef};
pub use snapshot::{PermissionSnapshot, Staleness, SCHEMA_VERSION};
pub use store::PermissionStore;
pub use sync::PermissionsSyncService;
pub use types::{AccessId, AccessKind, Permission, ProfileId, RoutineId, UserId};
