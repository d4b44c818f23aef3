//! # Localisation module
//!
//! The rover's pose is supplied externally every cycle, this module just gives it a typed form.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::telem::RoverTelem;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose and speed of the rover in the world map frame.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Pose {
    /// Position in world map units
    pub position: Vector2<f64>,

    /// Heading in the range [0, 360), measured from the world x axis.
    ///
    /// Units: degrees
    pub yaw_deg: f64,

    /// Units: degrees, wrapping at 360
    pub pitch_deg: f64,

    /// Units: degrees, wrapping at 360
    pub roll_deg: f64,

    /// Scalar forward velocity.
    ///
    /// Units: meters/second
    pub vel_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// A level, stationary pose at the given position and heading.
    pub fn at(x: f64, y: f64, yaw_deg: f64) -> Self {
        Self {
            position: Vector2::new(x, y),
            yaw_deg,
            ..Default::default()
        }
    }

    /// Return the heading of the rover in radians.
    pub fn get_heading(&self) -> f64 {
        self.yaw_deg.to_radians()
    }
}

impl From<&RoverTelem> for Pose {
    fn from(telem: &RoverTelem) -> Self {
        Self {
            position: Vector2::new(telem.pos_x, telem.pos_y),
            yaw_deg: telem.yaw_deg,
            pitch_deg: telem.pitch_deg,
            roll_deg: telem.roll_deg,
            vel_ms: telem.vel_ms,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
