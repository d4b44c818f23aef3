//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the inclusive range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Arithmetic mean of the given values, or `None` if there are none.
pub fn mean<T, I>(values: I) -> Option<T>
where
    T: Float,
    I: IntoIterator<Item = T>
{
    let mut sum = T::zero();
    let mut count = 0usize;

    for v in values {
        sum = sum + v;
        count += 1;
    }

    if count == 0 {
        None
    }
    else {
        T::from(count).map(|n| sum / n)
    }
}

/// Get the signed angular distance from `a` to `b` for angles on a circle of
/// the given period.
///
/// This function will return the shortest signed distance between a and b
/// accounting for wrapping, i.e. the value which when added to `a` gives `b`.
pub fn get_ang_dist<T>(a: T, b: T, period: T) -> T
where
    T: Float
{
    let c = rem_euclid(a - b, period);
    let d = rem_euclid(b - a, period);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Get the signed angular distance between two angles in degrees, in the range
/// [0, 360).
pub fn get_ang_dist_deg<T>(a: T, b: T) -> T
where
    T: Float
{
    get_ang_dist(a, b, T::from(360.0).unwrap_or_else(T::max_value))
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_ang_dist_deg() {
        assert_eq!(get_ang_dist_deg(10f64, 20f64), 10f64);
        assert_eq!(get_ang_dist_deg(20f64, 10f64), -10f64);
        assert_eq!(get_ang_dist_deg(0f64, 360f64), 0f64);
        assert_eq!(get_ang_dist_deg(355f64, 5f64), 10f64);
        assert_eq!(get_ang_dist_deg(5f64, 355f64), -10f64);
        assert_eq!(get_ang_dist_deg(90f64, 300f64), -150f64);
    }

    #[test]
    fn test_rem_euclid() {
        assert_eq!(rem_euclid(-30f64, 360f64), 330f64);
        assert_eq!(rem_euclid(390f64, 360f64), 30f64);
    }

    #[test]
    fn test_clamp_and_mean() {
        assert_eq!(clamp(20f64, -15.0, 15.0), 15.0);
        assert_eq!(clamp(-20f64, -15.0, 15.0), -15.0);
        assert_eq!(clamp(3f64, -15.0, 15.0), 3.0);

        assert_eq!(mean(vec![1f64, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(Vec::<f64>::new()), None);
    }
}
