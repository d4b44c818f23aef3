//! # Frame rectification
//!
//! Warps the forward camera frame into a top-down view of the ground in front of the rover, with
//! the rover's ground contact point at the bottom centre of the image.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use image::{Rgb, RgbImage};
use log::trace;
use nalgebra::{DMatrix, DVector, Matrix3, Point2, Vector3};
use ndarray::Array2;

use super::{BinaryLayer, PerError, PerParams};

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Homogeneous scale under which a point is considered to be at infinity.
const MIN_HOMOGENEOUS_SCALE: f64 = 1e-12;

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

/// Applies a fixed perspective transform to camera frames.
#[derive(Debug, Clone)]
pub struct FrameRectifier {
    /// Inverse of the raw to rectified homography, used to look up the source pixel of each
    /// rectified pixel
    inverse: Matrix3<f64>,

    /// Sign of the homogeneous scale for points on the ground side of the horizon
    ground_sign: f64,

    width: u32,
    height: u32,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl FrameRectifier {
    /// Build the rectifier from the perception parameters.
    pub fn new(params: &PerParams) -> Result<Self, PerError> {
        if params.frame_width == 0 || params.frame_height == 0 {
            return Err(PerError::EmptyFrame);
        }

        // All source points must be inside the frame, otherwise the quad doesn't describe
        // anything the camera can see.
        for (i, p) in params.source_quad_px.iter().enumerate() {
            if p[0] < 0.0
                || p[1] < 0.0
                || p[0] > (params.frame_width - 1) as f64
                || p[1] > (params.frame_height - 1) as f64
            {
                return Err(PerError::SourceQuadOutsideFrame(i, *p));
            }
        }

        let src = quad_to_points(&params.source_quad_px);
        let dst = quad_to_points(&params.destination_quad_px());

        let homography = perspective_transform(&src, &dst)?;
        let inverse = homography
            .try_inverse()
            .ok_or(PerError::DegenerateQuad)?;

        // The centre of the destination quad is on the ground by construction
        let dst_centre = dst
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + Vector3::new(p.x, p.y, 1.0))
            / 4.0;
        let w = (inverse * dst_centre).z;
        if w.abs() < MIN_HOMOGENEOUS_SCALE {
            return Err(PerError::DegenerateQuad);
        }

        Ok(Self {
            inverse,
            ground_sign: w.signum(),
            width: params.frame_width,
            height: params.frame_height,
        })
    }

    /// Warp the frame into the rectified view.
    ///
    /// Returns the warped frame, the same size as the input, and the validity mask. Pixels of the
    /// warped frame whose source lies outside the original frame are black and false in the mask.
    pub fn rectify(&self, frame: &RgbImage) -> Result<(RgbImage, BinaryLayer), PerError> {
        let (w, h) = frame.dimensions();

        if w == 0 || h == 0 {
            return Err(PerError::EmptyFrame);
        }
        if (w, h) != (self.width, self.height) {
            return Err(PerError::FrameSizeMismatch(self.width, self.height, w, h));
        }

        let mut warped = RgbImage::new(w, h);
        let mut mask: BinaryLayer = Array2::from_elem((h as usize, w as usize), false);

        let max_x = (w - 1) as f64;
        let max_y = (h - 1) as f64;

        for v in 0..h {
            for u in 0..w {
                let src = match self.source_of(u as f64, v as f64) {
                    Some(s) => s,
                    None => continue,
                };

                if src.x < 0.0 || src.y < 0.0 || src.x > max_x || src.y > max_y {
                    continue;
                }

                warped.put_pixel(u, v, sample_bilinear(frame, src.x, src.y));
                mask[[v as usize, u as usize]] = true;
            }
        }

        trace!(
            "Rectified {}x{} frame, {} valid pixels",
            w,
            h,
            mask.iter().filter(|m| **m).count()
        );

        Ok((warped, mask))
    }

    /// Find the location in the raw frame which maps onto the given rectified pixel, or `None` if
    /// it lies on or beyond the horizon.
    fn source_of(&self, u: f64, v: f64) -> Option<Point2<f64>> {
        let p = self.inverse * Vector3::new(u, v, 1.0);

        if p.z.abs() < MIN_HOMOGENEOUS_SCALE || p.z.signum() != self.ground_sign {
            return None;
        }

        Some(Point2::new(p.x / p.z, p.y / p.z))
    }
}

// -----------------------------------------------------------------------------------------------
// FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Calculate the homography which maps the four `src` points onto the four `dst` points.
///
/// The bottom right element of the homography is fixed to 1, leaving an 8x8 linear system.
pub fn perspective_transform(
    src: &[Point2<f64>; 4],
    dst: &[Point2<f64>; 4],
) -> Result<Matrix3<f64>, PerError> {
    let mut a = DMatrix::<f64>::zeros(8, 8);
    let mut b = DVector::<f64>::zeros(8);

    for i in 0..4 {
        let (x, y) = (src[i].x, src[i].y);
        let (u, v) = (dst[i].x, dst[i].y);

        a[(i, 0)] = x;
        a[(i, 1)] = y;
        a[(i, 2)] = 1.0;
        a[(i, 6)] = -x * u;
        a[(i, 7)] = -y * u;
        b[i] = u;

        a[(i + 4, 3)] = x;
        a[(i + 4, 4)] = y;
        a[(i + 4, 5)] = 1.0;
        a[(i + 4, 6)] = -x * v;
        a[(i + 4, 7)] = -y * v;
        b[i + 4] = v;
    }

    let h = a.lu().solve(&b).ok_or(PerError::DegenerateQuad)?;

    if h.iter().any(|e| !e.is_finite()) {
        return Err(PerError::DegenerateQuad);
    }

    Ok(Matrix3::new(
        h[0], h[1], h[2],
        h[3], h[4], h[5],
        h[6], h[7], 1.0
    ))
}

fn quad_to_points(quad: &[[f64; 2]; 4]) -> [Point2<f64>; 4] {
    [
        Point2::new(quad[0][0], quad[0][1]),
        Point2::new(quad[1][0], quad[1][1]),
        Point2::new(quad[2][0], quad[2][1]),
        Point2::new(quad[3][0], quad[3][1]),
    ]
}

/// Bilinear interpolation of the frame at a point inside its bounds.
fn sample_bilinear(frame: &RgbImage, x: f64, y: f64) -> Rgb<u8> {
    let (w, h) = frame.dimensions();

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = frame.get_pixel(x0, y0);
    let p10 = frame.get_pixel(x1, y0);
    let p01 = frame.get_pixel(x0, y1);
    let p11 = frame.get_pixel(x1, y1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - fx) + p10[c] as f64 * fx;
        let bottom = p01[c] as f64 * (1.0 - fx) + p11[c] as f64 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().min(255.0).max(0.0) as u8;
    }

    Rgb(out)
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn project(h: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
        let q = h * Vector3::new(p.x, p.y, 1.0);
        Point2::new(q.x / q.z, q.y / q.z)
    }

    #[test]
    fn test_perspective_transform_maps_corners() -> Result<(), PerError> {
        let params = PerParams::default();
        let src = quad_to_points(&params.source_quad_px);
        let dst = quad_to_points(&params.destination_quad_px());

        let h = perspective_transform(&src, &dst)?;

        for i in 0..4 {
            let p = project(&h, &src[i]);
            assert!((p.x - dst[i].x).abs() < 1e-6, "corner {} x: {} != {}", i, p.x, dst[i].x);
            assert!((p.y - dst[i].y).abs() < 1e-6, "corner {} y: {} != {}", i, p.y, dst[i].y);
        }

        Ok(())
    }

    #[test]
    fn test_degenerate_quad_rejected() {
        let p = Point2::new(10.0, 10.0);
        let src = [p, p, p, p];
        let dst = quad_to_points(&PerParams::default().destination_quad_px());

        assert!(matches!(perspective_transform(&src, &dst), Err(PerError::DegenerateQuad)));
    }

    #[test]
    fn test_rectify_rejects_wrong_size() -> Result<(), PerError> {
        let rect = FrameRectifier::new(&PerParams::default())?;

        match rect.rectify(&RgbImage::new(100, 100)) {
            Err(PerError::FrameSizeMismatch(320, 160, 100, 100)) => (),
            other => panic!("Expected size mismatch, got {:?}", other.map(|_| ())),
        }

        Ok(())
    }

    #[test]
    fn test_source_quad_outside_frame_rejected() {
        let mut params = PerParams::default();
        params.source_quad_px[2] = [400.0, 96.0];

        assert!(matches!(
            FrameRectifier::new(&params),
            Err(PerError::SourceQuadOutsideFrame(2, _))
        ));
    }

    #[test]
    fn test_mask_marks_valid_region() -> Result<(), PerError> {
        let params = PerParams::default();
        let rect = FrameRectifier::new(&params)?;

        let frame = RgbImage::from_pixel(320, 160, Rgb([200, 200, 200]));
        let (warped, mask) = rect.rectify(&frame)?;

        // The centre of the destination square is always valid and carries the frame colour
        let dst = params.destination_quad_px();
        let cx = ((dst[0][0] + dst[1][0]) / 2.0) as usize;
        let cy = ((dst[0][1] + dst[2][1]) / 2.0) as usize;
        assert!(mask[[cy, cx]]);
        assert_eq!(warped.get_pixel(cx as u32, cy as u32), &Rgb([200, 200, 200]));

        // The bottom corners of the rectified view are outside the camera's field of view, as is
        // the ground right under the camera
        assert!(!mask[[159, 0]]);
        assert!(!mask[[159, 319]]);
        assert!(!mask[[159, 160]]);
        assert_eq!(warped.get_pixel(0, 159), &Rgb([0, 0, 0]));

        // Far ahead the view fans out across the whole width
        assert!(mask[[0, 0]]);
        assert!(mask[[0, 319]]);

        // Every masked pixel is coloured, every unmasked pixel is black
        for ((r, c), valid) in mask.indexed_iter() {
            let px = warped.get_pixel(c as u32, r as u32);
            if *valid {
                assert_eq!(px, &Rgb([200, 200, 200]));
            } else {
                assert_eq!(px, &Rgb([0, 0, 0]));
            }
        }

        Ok(())
    }
}
