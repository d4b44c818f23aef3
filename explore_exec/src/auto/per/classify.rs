//! # Terrain classification
//!
//! Thresholds the rectified frame into navigable terrain, obstacle, and sample layers.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{Rgb, RgbImage};
use ndarray::{Array2, Zip};

use super::{BinaryLayer, PerParams};

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Colour threshold classifier.
#[derive(Debug, Clone)]
pub struct TerrainClassifier {
    nav_rgb_thresh: [u8; 3],
    sample_hsv_lower: [u8; 3],
    sample_hsv_upper: [u8; 3],
}

/// The three semantic layers of a rectified frame.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Light coloured ground the rover can drive on
    pub navigable: BinaryLayer,

    /// Anything in view that isn't navigable
    pub obstacle: BinaryLayer,

    /// Pixels matching the sample colour band
    pub sample: BinaryLayer,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl TerrainClassifier {
    pub fn new(params: &PerParams) -> Self {
        Self {
            nav_rgb_thresh: params.nav_rgb_thresh,
            sample_hsv_lower: params.sample_hsv_lower,
            sample_hsv_upper: params.sample_hsv_upper,
        }
    }

    /// Classify a rectified frame. `valid_mask` must be the mask produced alongside the frame by
    /// the rectifier.
    pub fn classify(&self, warped: &RgbImage, valid_mask: &BinaryLayer) -> Classification {
        let (w, h) = warped.dimensions();
        let shape = (h as usize, w as usize);

        let navigable = Array2::from_shape_fn(shape, |(r, c)| {
            self.is_navigable(warped.get_pixel(c as u32, r as u32))
        });

        let sample = Array2::from_shape_fn(shape, |(r, c)| {
            self.is_sample(warped.get_pixel(c as u32, r as u32))
        });

        // Obstacles are whatever isn't navigable, but only where the camera could actually see
        let mut obstacle = Array2::from_elem(shape, false);
        Zip::from(&mut obstacle)
            .and(&navigable)
            .and(valid_mask)
            .for_each(|o, &n, &v| *o = !n && v);

        Classification {
            navigable,
            obstacle,
            sample,
        }
    }

    fn is_navigable(&self, px: &Rgb<u8>) -> bool {
        px[0] > self.nav_rgb_thresh[0]
            && px[1] > self.nav_rgb_thresh[1]
            && px[2] > self.nav_rgb_thresh[2]
    }

    fn is_sample(&self, px: &Rgb<u8>) -> bool {
        let hsv = rgb_to_hsv(px.0);

        (0..3).all(|i| hsv[i] >= self.sample_hsv_lower[i] && hsv[i] <= self.sample_hsv_upper[i])
    }
}

impl Classification {
    /// Build the classification overlay for display: obstacles in red, samples in green and
    /// navigable terrain in blue.
    pub fn vision_image(&self) -> RgbImage {
        let (h, w) = self.navigable.dim();

        RgbImage::from_fn(w as u32, h as u32, |x, y| {
            let idx = [y as usize, x as usize];
            Rgb([
                if self.obstacle[idx] { 255 } else { 0 },
                if self.sample[idx] { 255 } else { 0 },
                if self.navigable[idx] { 255 } else { 0 },
            ])
        })
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Convert an 8 bit RGB pixel into 8 bit HSV.
///
/// Hue is halved to fit in a byte, giving a range of [0, 180). Saturation and value are in
/// [0, 255].
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let r = rgb[0] as f64;
    let g = rgb[1] as f64;
    let b = rgb[2] as f64;

    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { 255.0 * delta / v } else { 0.0 };

    let mut hue = if delta == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / delta
    } else if v == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    // Halving can round 359.x up to 180, which wraps back to red
    let h = (hue / 2.0).round() as u32 % 180;

    [h as u8, s.round() as u8, v as u8]
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
