//! # Map accumulator
//!
//! Adds each frame's projected terrain to the occupancy map, as long as the rover is level enough
//! for the projection to be trusted.

// ------------------------------------------------------------------------------------------------
// INCLUDES
// ------------------------------------------------------------------------------------------------

use log::{trace, warn};

use super::{GridCell, MapError, MapLayer, MapParams, OccupancyMap};
use crate::auto::loc::Pose;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Gated accumulation of terrain evidence into an [`OccupancyMap`].
#[derive(Debug, Clone)]
pub struct MapAccumulator {
    params: MapParams,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MapAccumulator {
    pub fn new(params: MapParams) -> Result<Self, MapError> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    /// True if the pose is level enough to update the map.
    pub fn gate_open(&self, pose: &Pose) -> bool {
        attitude_ok(pose.pitch_deg, self.params.pitch_tol_deg)
            && attitude_ok(pose.roll_deg, self.params.roll_tol_deg)
    }

    /// Record the given cells into the map if the attitude gate is open.
    ///
    /// Returns whether the map was updated. If any cell is outside the map nothing is recorded.
    pub fn accumulate(
        &self,
        map: &mut OccupancyMap,
        pose: &Pose,
        obstacle: &[GridCell],
        sample: &[GridCell],
        navigable: &[GridCell],
    ) -> Result<bool, MapError> {
        if !self.gate_open(pose) {
            warn!(
                "Map update skipped, attitude outside tolerance (pitch {:.2} deg, roll {:.2} deg)",
                pose.pitch_deg, pose.roll_deg
            );
            return Ok(false);
        }

        if let Some(c) = obstacle
            .iter()
            .chain(sample)
            .chain(navigable)
            .find(|c| !map.cell_in_map(c))
        {
            return Err(MapError::OutsideMap(*c, map.world_size()));
        }

        map.record(MapLayer::Obstacle, obstacle)?;
        map.record(MapLayer::Sample, sample)?;
        map.record(MapLayer::Navigable, navigable)?;

        trace!(
            "Map updated with {} obstacle, {} sample, {} navigable cells",
            obstacle.len(),
            sample.len(),
            navigable.len()
        );

        Ok(true)
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// True if an attitude angle, wrapping at 360 degrees, is within `tol_deg` of zero.
pub fn attitude_ok(angle_deg: f64, tol_deg: f64) -> bool {
    angle_deg <= tol_deg || angle_deg >= 360.0 - tol_deg
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
