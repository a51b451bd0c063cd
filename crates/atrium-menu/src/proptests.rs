//! Property-based tests for menu filtering.
