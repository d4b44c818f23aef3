//! # Perception
//!
//! Turns a raw forward camera frame into classified terrain, both in rover-centric coordinates
//! (for steering) and in world map cells (for the occupancy map).
//!
//! The pipeline for a single frame is:
//!
//! 1. [`FrameRectifier`] warps the frame into a top-down view and produces a validity mask.
//! 2. [`TerrainClassifier`] splits the view into navigable, obstacle, and sample layers.
//! 3. [`rover_coords`] and [`WorldTransform`] project the active pixels of each layer into the
//!    rover frame and onto the world grid.
//!
//! Blending already-explored terrain back into the steering set is done by
//! [`explored_rover_coords`] once the occupancy map has been updated for this frame.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod bias;
mod classify;
mod coords;
mod params;
mod rectify;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use image::RgbImage;
use log::debug;
use nalgebra::Point2;
use ndarray::Array2;

pub use bias::explored_rover_coords;
pub use classify::{rgb_to_hsv, Classification, TerrainClassifier};
pub use coords::{rover_coords, to_polar, WorldTransform};
pub use params::PerParams;
pub use rectify::{perspective_transform, FrameRectifier};

use super::map::GridCell;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// A single semantic class over the rectified frame, indexed `[row, col]`.
pub type BinaryLayer = Array2<bool>;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Perception manager, owning the fixed rectification and classification stages.
#[derive(Debug, Clone)]
pub struct PerMgr {
    params: PerParams,
    rectifier: FrameRectifier,
    classifier: TerrainClassifier,
}

/// The result of processing a single frame.
#[derive(Debug, Clone)]
pub struct Perception {
    /// Classified layers of the rectified frame
    pub classification: Classification,

    /// Rover-centric coordinates of every navigable pixel
    pub nav_rover: Vec<Point2<f64>>,

    /// World coordinates of every navigable pixel, before clamping to the map bounds
    pub nav_world: Vec<Point2<f64>>,

    /// Map cells hit by navigable pixels
    pub nav_cells: Vec<GridCell>,

    /// Map cells hit by obstacle pixels
    pub obstacle_cells: Vec<GridCell>,

    /// Map cells hit by sample pixels
    pub sample_cells: Vec<GridCell>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur in perception.
#[derive(Debug, thiserror::Error)]
pub enum PerError {
    #[error("The frame has no pixels")]
    EmptyFrame,

    #[error("Expected a {0}x{1} frame but got a {2}x{3} frame")]
    FrameSizeMismatch(u32, u32, u32, u32),

    #[error("Source quad point {0} ({1:?}) lies outside the frame")]
    SourceQuadOutsideFrame(usize, [f64; 2]),

    #[error("The rectification quads do not define an invertible perspective transform")]
    DegenerateQuad,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PerMgr {
    /// Create a new perception manager, validating the rectification parameters.
    pub fn new(params: PerParams) -> Result<Self, PerError> {
        let rectifier = FrameRectifier::new(&params)?;
        let classifier = TerrainClassifier::new(&params);

        Ok(Self {
            params,
            rectifier,
            classifier,
        })
    }

    pub fn params(&self) -> &PerParams {
        &self.params
    }

    /// Process a single frame taken at the pose described by `tf`.
    ///
    /// Fails if the frame doesn't have the configured dimensions.
    pub fn process(&self, frame: &RgbImage, tf: &WorldTransform) -> Result<Perception, PerError> {
        let (warped, mask) = self.rectifier.rectify(frame)?;

        let classification = self.classifier.classify(&warped, &mask);

        let nav_rover = rover_coords(&classification.navigable);
        let nav_world: Vec<_> = nav_rover.iter().map(|p| tf.rover_to_world(p)).collect();
        let nav_cells = nav_world.iter().map(|p| tf.world_to_cell(p)).collect();

        let obstacle_cells = tf.layer_to_cells(&classification.obstacle);
        let sample_cells = tf.layer_to_cells(&classification.sample);

        debug!(
            "Perception: {} navigable, {} obstacle, {} sample pixels",
            nav_rover.len(),
            obstacle_cells.len(),
            sample_cells.len()
        );

        Ok(Perception {
            classification,
            nav_rover,
            nav_world,
            nav_cells,
            obstacle_cells,
            sample_cells,
        })
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
