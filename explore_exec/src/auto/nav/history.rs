//! # Rolling history
//!
//! Fixed capacity history of recent samples used for self diagnosis.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A ring buffer which always holds exactly `capacity` samples.
///
/// The buffer is primed with a fill value on creation and on reset, so the mean is always taken
/// over `capacity` samples.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    fill: f64,
    samples: VecDeque<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RollingHistory {
    /// Create a new history. `capacity` must be non-zero.
    pub fn new(capacity: usize, fill: f64) -> Self {
        Self {
            fill,
            samples: std::iter::repeat(fill).take(capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Insert a new sample, evicting the oldest.
    pub fn push(&mut self, sample: f64) {
        if self.samples.pop_front().is_some() {
            self.samples.push_back(sample);
        }
    }

    /// Mean of the held samples.
    pub fn mean(&self) -> f64 {
        util::maths::mean(self.samples.iter().copied()).unwrap_or(self.fill)
    }

    /// Refill the history with the fill value.
    pub fn reset(&mut self) {
        for s in self.samples.iter_mut() {
            *s = self.fill;
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rolling_history() {
        let mut hist = RollingHistory::new(4, 1.0);
        assert_eq!(hist.capacity(), 4);
        assert_eq!(hist.mean(), 1.0);

        hist.push(0.0);
        hist.push(0.0);
        assert_eq!(hist.capacity(), 4);
        assert_eq!(hist.mean(), 0.5);

        // Oldest samples are evicted first
        for _ in 0..3 {
            hist.push(2.0);
        }
        assert_eq!(hist.mean(), 1.5);

        hist.reset();
        assert_eq!(hist.mean(), 1.0);
        assert_eq!(hist.capacity(), 4);
    }
}
