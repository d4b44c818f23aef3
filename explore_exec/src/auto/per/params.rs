//! Perception parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the perception pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerParams {

    // ---- FRAME ----

    /// Width of the camera frame.
    ///
    /// Units: pixels
    pub frame_width: u32,

    /// Height of the camera frame.
    ///
    /// Units: pixels
    pub frame_height: u32,

    // ---- RECTIFICATION ----

    /// Four points in the raw camera frame, `[x, y]` with y down, outlining a
    /// one metre square grid cell on flat ground. Order: bottom left, bottom
    /// right, top right, top left.
    ///
    /// Units: pixels
    pub source_quad_px: [[f64; 2]; 4],

    /// Half width of the destination square that the source quad is mapped
    /// onto in the rectified image.
    ///
    /// Units: pixels
    pub dst_half_size_px: f64,

    /// Distance between the bottom edge of the image and the rover's ground
    /// contact point.
    ///
    /// Units: pixels
    pub bottom_offset_px: f64,

    // ---- CLASSIFICATION ----

    /// A pixel is navigable if all three channels are strictly above these
    /// values.
    pub nav_rgb_thresh: [u8; 3],

    /// Inclusive lower bound of the sample colour band, HSV with H in [0, 180).
    pub sample_hsv_lower: [u8; 3],

    /// Inclusive upper bound of the sample colour band, HSV with H in [0, 180).
    pub sample_hsv_upper: [u8; 3],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PerParams {
    /// Destination quad for the rectification, matching the order of
    /// `source_quad_px`.
    pub fn destination_quad_px(&self) -> [[f64; 2]; 4] {
        let half_w = self.frame_width as f64 / 2.0;
        let h = self.frame_height as f64;
        let d = self.dst_half_size_px;
        let b = self.bottom_offset_px;

        [
            [half_w - d, h - b],
            [half_w + d, h - b],
            [half_w + d, h - 2.0 * d - b],
            [half_w - d, h - 2.0 * d - b],
        ]
    }
}

impl Default for PerParams {
    fn default() -> Self {
        Self {
            frame_width: 320,
            frame_height: 160,
            source_quad_px: [[14.0, 140.0], [301.0, 140.0], [200.0, 96.0], [118.0, 96.0]],
            dst_half_size_px: 5.0,
            bottom_offset_px: 6.0,
            nav_rgb_thresh: [160, 160, 160],
            sample_hsv_lower: [20, 100, 100],
            sample_hsv_upper: [40, 255, 255],
        }
    }
}
