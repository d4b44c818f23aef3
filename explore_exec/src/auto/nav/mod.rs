//! # Navigation
//!
//! This module provides reactive navigation control of the rover.
//!
//! [`NavCtrl`] is a tick driven state machine with four modes:
//! - `Forward` - Drive along the mean direction of the navigable terrain.
//! - `Stopped` - Brake to a halt, then turn on the spot until enough navigable terrain is seen.
//! - `Stuck` - Entered by self diagnosis when the rover hasn't been moving. The rover turns away
//!   from its current heading before resuming `Forward`.
//! - `CircularMotion` - Entered by self diagnosis when the rover has been steering hard for a long
//!   time. The rover stops, turns towards its start position, and drives that way for a while
//!   before resuming `Forward`.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod history;
mod params;
mod state;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use history::RollingHistory;
pub use params::NavParams;
pub use state::{NavCtrl, NavInput, NavMode, NavStatusReport, Recovery};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error("Invalid navigation parameters: {0}")]
    InvalidParams(&'static str),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NavParams {
    /// Check the parameters describe a usable controller.
    pub fn validate(&self) -> Result<(), NavError> {
        if self.history_len == 0 {
            return Err(NavError::InvalidParams("history_len must be greater than zero"));
        }
        if !(self.steer_limit_deg >= 0.0) {
            return Err(NavError::InvalidParams("steer_limit_deg must not be negative"));
        }
        if !(self.heading_tol_deg > 0.0) {
            return Err(NavError::InvalidParams("heading_tol_deg must be greater than zero"));
        }
        if !(self.update_rate_s >= 0.0) || !(self.override_window_s >= 0.0) {
            return Err(NavError::InvalidParams("durations must not be negative"));
        }
        if let Some(d) = self.max_recovery_duration_s {
            if !(d > 0.0) {
                return Err(NavError::InvalidParams(
                    "max_recovery_duration_s must be greater than zero",
                ));
            }
        }

        Ok(())
    }
}
