//! Integration test suite for the authorization core.
//!
//! Exercises the full event flow — profile change, sync fetch, two-phase
//! broadcast — against mock collaborators, and the end-to-end query
//! behavior a screen would observe.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;
mod integration;
