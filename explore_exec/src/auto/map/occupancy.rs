//! # Occupancy map

// ------------------------------------------------------------------------------------------------
// INCLUDES
// ------------------------------------------------------------------------------------------------

use image::{Rgb, RgbImage};
use ndarray::{s, Array2, Array3, ArrayView2};
use serde::{Deserialize, Serialize};

use super::{GridCell, MapError, MapLayer};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Square world map holding a running count of evidence per layer and cell.
///
/// Counts are never decreased. There is no reset, the map lives for the whole mission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OccupancyMap {
    /// Number of cells along each side of the map
    world_size: usize,

    /// Raw map data, a 3D array with dimension order layer, y cell, x cell
    data: Array3<u32>,
}

/// How well the map agrees with a known ground truth.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MapFidelity {
    /// Percentage of ground truth navigable cells which have been correctly mapped, or `None` if
    /// the ground truth contains no navigable cells.
    pub perc_mapped: Option<f64>,

    /// Percentage of cells mapped as navigable which are navigable in the ground truth, or `None`
    /// if nothing has been mapped as navigable.
    pub fidelity: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OccupancyMap {
    /// Create a new empty map.
    pub fn new(world_size: usize) -> Self {
        Self {
            world_size,
            data: Array3::zeros((MapLayer::ALL.len(), world_size, world_size)),
        }
    }

    pub fn world_size(&self) -> usize {
        self.world_size
    }

    pub fn cell_in_map(&self, cell: &GridCell) -> bool {
        cell.x < self.world_size && cell.y < self.world_size
    }

    /// Add the layer's weight to the count of every given cell, once per occurrence.
    ///
    /// Either all cells are recorded or, if any is outside the map, none are.
    pub fn record(&mut self, layer: MapLayer, cells: &[GridCell]) -> Result<(), MapError> {
        if let Some(c) = cells.iter().find(|c| !self.cell_in_map(c)) {
            return Err(MapError::OutsideMap(*c, self.world_size));
        }

        let idx = layer.index();
        let weight = layer.weight();

        for c in cells {
            let count = &mut self.data[[idx, c.y, c.x]];
            *count = count.saturating_add(weight);
        }

        Ok(())
    }

    pub fn get(&self, layer: MapLayer, cell: GridCell) -> Result<u32, MapError> {
        if !self.cell_in_map(&cell) {
            return Err(MapError::OutsideMap(cell, self.world_size));
        }

        Ok(self.data[[layer.index(), cell.y, cell.x]])
    }

    /// True if navigable terrain has ever been recorded in this cell. Cells outside the map are
    /// never explored.
    pub fn is_explored(&self, cell: GridCell) -> bool {
        self.get(MapLayer::Navigable, cell)
            .map(|n| n > 0)
            .unwrap_or(false)
    }

    /// View of a single layer, indexed `[y, x]`.
    pub fn layer(&self, layer: MapLayer) -> ArrayView2<u32> {
        self.data.slice(s![layer.index(), .., ..])
    }

    /// Number of cells with a non-zero count in the layer.
    pub fn num_nonzero(&self, layer: MapLayer) -> usize {
        self.layer(layer).iter().filter(|c| **c > 0).count()
    }

    /// Cells considered navigable: those where navigable evidence outweighs obstacle evidence.
    pub fn navigable_mask(&self) -> Array2<bool> {
        let mut mask = Array2::from_elem((self.world_size, self.world_size), false);

        ndarray::Zip::from(&mut mask)
            .and(self.layer(MapLayer::Navigable))
            .and(self.layer(MapLayer::Obstacle))
            .for_each(|m, &nav, &obs| *m = nav > obs);

        mask
    }

    /// Render the map as an RGB image with obstacles in red, samples in green and navigable
    /// terrain in blue. Counts saturate at 255.
    ///
    /// Image rows run top to bottom, so the map is flipped to put world +y at the top.
    pub fn to_image(&self) -> RgbImage {
        let size = self.world_size as u32;

        RgbImage::from_fn(size, size, |col, row| {
            let y = (size - 1 - row) as usize;
            let x = col as usize;
            let mut px = [0u8; 3];

            for layer in MapLayer::ALL.iter() {
                px[layer.index()] = self.data[[layer.index(), y, x]].min(255) as u8;
            }

            Rgb(px)
        })
    }

    /// Compare the map against a ground truth navigable mask indexed `[y, x]`.
    pub fn fidelity(&self, ground_truth: &Array2<bool>) -> Result<MapFidelity, MapError> {
        if ground_truth.dim() != (self.world_size, self.world_size) {
            return Err(MapError::IncompatibleShape(
                ground_truth.shape().to_vec(),
                self.world_size,
            ));
        }

        let mapped = self.navigable_mask();

        let num_mapped = mapped.iter().filter(|m| **m).count();
        let num_truth = ground_truth.iter().filter(|t| **t).count();
        let num_good = mapped
            .iter()
            .zip(ground_truth.iter())
            .filter(|(m, t)| **m && **t)
            .count();

        let perc = |num: usize, den: usize| {
            if den == 0 {
                None
            } else {
                Some(100.0 * num as f64 / den as f64)
            }
        };

        Ok(MapFidelity {
            perc_mapped: perc(num_good, num_truth),
            fidelity: perc(num_good, num_mapped),
        })
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
