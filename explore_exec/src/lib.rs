//! # Exploration rover library.
//!
//! This library allows other crates in the workspace, and the benchmarks and integration tests, to
//! access items defined inside the exploration crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Autonomy module - perception, mapping and navigation
pub mod auto;

/// Replay module - reads recorded runs from disk
pub mod replay;
