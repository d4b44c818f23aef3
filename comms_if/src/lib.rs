//! # Communications interface crate.
//!
//! Provides the interfaces exchanged between the rover core and its external
//! collaborators: telemetry in, drive demands out.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Demand and telemetry definitions for equipment (drive train, rover telemetry)
pub mod eqpt;
