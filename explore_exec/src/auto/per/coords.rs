//! # Coordinate mapping
//!
//! Conversions between rectified image pixels, rover-centric coordinates, and world map cells.
//!
//! Rover-centric coordinates have their origin at the bottom centre of the rectified image, with
//! x pointing forwards and y pointing left. Units are rectified pixels.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use nalgebra::{Point2, Rotation2, Vector2};

use super::BinaryLayer;
use crate::auto::{
    loc::Pose,
    map::{GridCell, MapParams},
};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Rigid transform plus scaling between the rover frame at a given pose and the world map.
#[derive(Debug, Clone, Copy)]
pub struct WorldTransform {
    position: Vector2<f64>,
    rotation: Rotation2<f64>,

    /// Rectified pixels per world unit
    scale: f64,

    world_size: usize,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl WorldTransform {
    pub fn new(pose: &Pose, map_params: &MapParams) -> Self {
        Self {
            position: pose.position,
            rotation: Rotation2::new(pose.get_heading()),
            scale: map_params.scale,
            world_size: map_params.world_size,
        }
    }

    /// Rotate by the heading, scale down to world units, and translate by the rover position.
    pub fn rover_to_world(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::from(self.rotation * p.coords / self.scale + self.position)
    }

    /// Exact inverse of [`WorldTransform::rover_to_world`].
    pub fn world_to_rover(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::from(self.rotation.inverse() * ((p.coords - self.position) * self.scale))
    }

    /// The map cell containing the world point, clamped to the map bounds.
    pub fn world_to_cell(&self, p: &Point2<f64>) -> GridCell {
        let max = (self.world_size - 1) as f64;

        GridCell {
            x: util::maths::clamp(p.x, 0.0, max) as usize,
            y: util::maths::clamp(p.y, 0.0, max) as usize,
        }
    }

    /// Project every active pixel of a layer onto the map.
    pub fn layer_to_cells(&self, layer: &BinaryLayer) -> Vec<GridCell> {
        rover_coords(layer)
            .iter()
            .map(|p| self.world_to_cell(&self.rover_to_world(p)))
            .collect()
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Rover-centric coordinates of every active pixel in the layer, in row major order.
pub fn rover_coords(layer: &BinaryLayer) -> Vec<Point2<f64>> {
    let (height, width) = layer.dim();
    let half_width = width as f64 / 2.0;

    layer
        .indexed_iter()
        .filter(|(_, active)| **active)
        .map(|((row, col), _)| Point2::new(height as f64 - row as f64, half_width - col as f64))
        .collect()
}

/// Convert rover-centric points into `(distances, angles)`, angles in radians from the forward
/// axis, positive left.
pub fn to_polar<'a, I>(points: I) -> (Vec<f64>, Vec<f64>)
where
    I: IntoIterator<Item = &'a Point2<f64>>,
{
    points
        .into_iter()
        .map(|p| (p.coords.norm(), p.y.atan2(p.x)))
        .unzip()
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
