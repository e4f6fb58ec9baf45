//! Shared helpers for the engine's integration tests: one-time logging setup
//! and collision-free names for seeded rows.

pub mod logging;
pub mod unique_helpers;
