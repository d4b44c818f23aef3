//! # Map
//!
//! This module implements the persistent [`OccupancyMap`] of the rover's world and the
//! [`MapAccumulator`] which feeds it with each frame's classified terrain.

// ------------------------------------------------------------------------------------------------
// MODS
// ------------------------------------------------------------------------------------------------

mod accumulator;
mod occupancy;
mod params;

// ------------------------------------------------------------------------------------------------
// EXPORTS
// ------------------------------------------------------------------------------------------------

pub use accumulator::{attitude_ok, MapAccumulator};
pub use occupancy::{MapFidelity, OccupancyMap};
pub use params::MapParams;

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Index of a single cell in the world map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Layers in an [`OccupancyMap`]
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug, Serialize, Deserialize)]
pub enum MapLayer {
    Obstacle,
    Sample,
    Navigable,
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Cell {0:?} is outside the {1}x{1} map")]
    OutsideMap(GridCell, usize),

    #[error("Provided array shape {0:?} doesn't match the {1}x{1} map")]
    IncompatibleShape(Vec<usize>, usize),

    #[error("Invalid map parameters: {0}")]
    InvalidParams(&'static str),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MapLayer {
    pub const ALL: [MapLayer; 3] = [MapLayer::Obstacle, MapLayer::Sample, MapLayer::Navigable];

    /// Index of the layer in the map data, which is also the RGB channel used to draw it.
    pub fn index(&self) -> usize {
        match self {
            MapLayer::Obstacle => 0,
            MapLayer::Sample => 1,
            MapLayer::Navigable => 2,
        }
    }

    /// Amount added to a cell's count for each pixel landing in it.
    ///
    /// Navigable terrain is weighted heavily so that it wins over obstacle hits from the less
    /// reliable obstacle classification.
    pub fn weight(&self) -> u32 {
        match self {
            MapLayer::Navigable => 10,
            _ => 1,
        }
    }
}

impl MapParams {
    /// Check the parameters describe a usable map.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.world_size == 0 {
            return Err(MapError::InvalidParams("world_size must be greater than zero"));
        }
        if !(self.scale > 0.0) {
            return Err(MapError::InvalidParams("scale must be greater than zero"));
        }
        if self.pitch_tol_deg < 0.0 || self.roll_tol_deg < 0.0 {
            return Err(MapError::InvalidParams("attitude tolerances must not be negative"));
        }

        Ok(())
    }
}
