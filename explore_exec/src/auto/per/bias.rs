//! # Exploration bias
//!
//! Navigable terrain which lands in cells already marked navigable on the map is transformed back
//! into the rover frame, so that it can be counted a second time alongside the current frame's
//! navigable terrain when choosing a steering angle.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use nalgebra::Point2;

use super::WorldTransform;
use crate::auto::map::OccupancyMap;

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Rover-centric coordinates of the navigable points in `nav_world` whose map cell has already
/// been explored.
///
/// `nav_world` must be the unclamped world coordinates produced with `tf`, so that the inverse
/// transform recovers the original rover-centric points.
pub fn explored_rover_coords(
    map: &OccupancyMap,
    nav_world: &[Point2<f64>],
    tf: &WorldTransform,
) -> Vec<Point2<f64>> {
    nav_world
        .iter()
        .filter(|p| map.is_explored(tf.world_to_cell(p)))
        .map(|p| tf.world_to_rover(p))
        .collect()
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
