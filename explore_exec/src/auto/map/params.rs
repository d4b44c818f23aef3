//! Occupancy map parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of the world occupancy map and its accumulation gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapParams {
    /// Number of cells along each side of the square world map.
    pub world_size: usize,

    /// Number of rectified image pixels per world map unit.
    pub scale: f64,

    /// Pitch must be within this many degrees of zero for the map to be
    /// updated.
    ///
    /// Units: degrees
    pub pitch_tol_deg: f64,

    /// Roll must be within this many degrees of zero for the map to be
    /// updated.
    ///
    /// Units: degrees
    pub roll_tol_deg: f64,
}

impl Default for MapParams {
    fn default() -> Self {
        Self {
            world_size: 200,
            scale: 10.0,
            pitch_tol_deg: 1.0,
            roll_tol_deg: 1.0,
        }
    }
}
