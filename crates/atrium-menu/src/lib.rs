//! # atrium-menu
//!
//! The static navigation-menu definition and the engine that filters it
//! down to what the current permission set authorizes. The definition is
//! pure input, supplied at composition time; nothing here fetches or
//! persists menu structure.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod definition;
pub mod engine;
mod proptests;

pub use definition::{MenuGate, MenuNode};
pub use engine::MenuAuthorizationEngine;
