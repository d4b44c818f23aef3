//! # Autonomy Module
//!
//! This module provides the perception to decision core of the rover. Every cycle a camera frame
//! and a telemetry snapshot go in, drive demands come out, and the world map is updated along the
//! way.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

pub use auto_mgr::{AutoMgr, AutoMgrError, AutoStatusReport, TickInput};
pub use params::AutoParams;

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Automation Manager module - runs a full cycle of the autonomy pipeline
pub mod auto_mgr;

/// Localisation module - the rover's pose as reported by telemetry
pub mod loc;

/// Map module - the persistent occupancy map of the world
pub mod map;

/// Navigation module - reactive drive control with self diagnosis
pub mod nav;

/// Perception module - converts camera frames into classified terrain
pub mod per;

mod params;
