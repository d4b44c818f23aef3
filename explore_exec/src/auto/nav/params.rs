//! Navigation control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for navigation control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavParams {

    // ---- FORWARD/STOP ----

    /// Minimum number of navigable angles required to keep driving forward.
    pub stop_forward: usize,

    /// Minimum number of navigable angles required to set off again once
    /// stopped.
    pub go_forward: usize,

    /// Velocity above which the throttle is released.
    ///
    /// Units: meters/second
    pub max_vel_ms: f64,

    /// Throttle demand when accelerating.
    pub throttle_set: f64,

    /// Brake demand when braking.
    pub brake_set: f64,

    /// Absolute limit on the steering demand.
    ///
    /// Units: degrees
    pub steer_limit_deg: f64,

    /// Velocity at or below which the rover is considered stopped.
    ///
    /// Units: meters/second
    pub stopped_vel_ms: f64,

    // ---- SELF DIAGNOSIS ----

    /// Minimum mission time between two samples of the rolling histories.
    ///
    /// Units: seconds
    pub update_rate_s: f64,

    /// Number of samples held in each rolling history.
    pub history_len: usize,

    /// Mean absolute steering above which the rover is considered to be
    /// driving in circles.
    ///
    /// Units: degrees
    pub circular_steer_thresh_deg: f64,

    // ---- RECOVERY ----

    /// Heading error under which a recovery turn is complete.
    ///
    /// Units: degrees
    pub heading_tol_deg: f64,

    /// Heading change commanded when stuck.
    ///
    /// Units: degrees
    pub stuck_turn_deg: f64,

    /// Time to drive towards the start position after a circular motion
    /// recovery turn.
    ///
    /// Units: seconds
    pub override_window_s: f64,

    /// If set, recoveries which have not completed within this time are
    /// abandoned and forward driving resumed.
    ///
    /// Units: seconds
    #[serde(default)]
    pub max_recovery_duration_s: Option<f64>,
}

impl Default for NavParams {
    fn default() -> Self {
        Self {
            stop_forward: 50,
            go_forward: 500,
            max_vel_ms: 2.0,
            throttle_set: 0.2,
            brake_set: 10.0,
            steer_limit_deg: 15.0,
            stopped_vel_ms: 0.2,
            update_rate_s: 0.5,
            history_len: 10,
            circular_steer_thresh_deg: 14.5,
            heading_tol_deg: 5.0,
            stuck_turn_deg: 30.0,
            override_window_s: 5.0,
            max_recovery_duration_s: Some(30.0),
        }
    }
}
