//! # Rover Telemetry
//!
//! The pose and status snapshot supplied to the rover core every control cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Telemetry snapshot for a single control cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RoverTelem {
    /// Elapsed mission time, monotonic.
    ///
    /// Units: seconds
    pub time_s: f64,

    /// Position of the rover in the world map frame.
    ///
    /// Units: world map units (one map cell per unit)
    pub pos_x: f64,
    pub pos_y: f64,

    /// Heading of the rover, in the range [0, 360).
    ///
    /// Units: degrees
    pub yaw_deg: f64,

    /// Pitch of the rover, wrapping at 360.
    ///
    /// Units: degrees
    pub pitch_deg: f64,

    /// Roll of the rover, wrapping at 360.
    ///
    /// Units: degrees
    pub roll_deg: f64,

    /// Scalar forward velocity.
    ///
    /// Units: meters/second
    pub vel_ms: f64,

    /// True if the rover is within pickup range of a sample.
    pub near_sample: bool,

    /// True if a pickup is currently in progress.
    pub picking_up: bool,
}
