//! # Drive Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Demands sent to the drive train actuators every control cycle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveDems {
    /// Throttle demand, between zero and the configured maximum.
    pub throttle: f64,

    /// Brake demand, either zero or the configured braking magnitude.
    pub brake: f64,

    /// Steering angle demand.
    ///
    /// Units: degrees, positive left
    pub steer_deg: f64,

    /// Request the sample pickup mechanism to be activated this cycle.
    pub send_pickup: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveDems {
    /// Returns true if both throttle and brake are being demanded at once.
    pub fn is_conflicting(&self) -> bool {
        self.throttle > 0.0 && self.brake > 0.0
    }

    /// Returns true if the steering demand is within `+/- limit_deg`.
    pub fn steer_within(&self, limit_deg: f64) -> bool {
        self.steer_deg.abs() <= limit_deg
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_drive_dems_checks() {
        let mut dems = DriveDems::default();
        assert!(!dems.is_conflicting());
        assert!(dems.steer_within(15.0));

        dems.throttle = 0.2;
        dems.brake = 10.0;
        dems.steer_deg = -16.0;
        assert!(dems.is_conflicting());
        assert!(!dems.steer_within(15.0));
    }

    #[test]
    fn test_drive_dems_json() {
        let dems: DriveDems = serde_json::from_str(
            r#"{"throttle": 0.2, "brake": 0.0, "steer_deg": -15.0, "send_pickup": false}"#
        ).unwrap();

        assert_eq!(dems.throttle, 0.2);
        assert_eq!(dems.steer_deg, -15.0);
        assert!(!dems.send_pickup);
    }
}
