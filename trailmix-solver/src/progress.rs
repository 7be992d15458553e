//! Progress reporting that other threads can poll.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared completion fraction of a running solve.
///
/// Stores an `f64` in `[0, 1]` as raw bits so readers never block the
/// solver. Within one run the value only grows; it drops back to zero when
/// the run finishes.
///
/// # Examples
/// ```
/// use trailmix_solver::Progress;
///
/// let progress = Progress::default();
/// let observer = progress.clone();
/// progress.advance(0.4);
/// progress.advance(0.2);
/// assert_eq!(observer.get(), 0.4);
/// progress.advance(7.0);
/// assert_eq!(observer.get(), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Progress(Arc<AtomicU64>);

impl Progress {
    /// Current fraction in `[0, 1]`.
    #[must_use]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Raise the fraction to `fraction`, clamped to `[0, 1]`.
    ///
    /// Lower values and NaN are ignored.
    pub fn advance(&self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let clamped = fraction.clamp(0.0, 1.0);
        let mut current = self.0.load(Ordering::Relaxed);
        while clamped > f64::from_bits(current) {
            match self.0.compare_exchange_weak(
                current,
                clamped.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => current = actual,
            }
        }
    }

    /// Return to zero.
    pub fn reset(&self) {
        self.0.store(0.0_f64.to_bits(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn starts_at_zero_and_resets() {
        let progress = Progress::default();
        assert!(progress.get().abs() < f64::EPSILON);
        progress.advance(0.75);
        assert!((progress.get() - 0.75).abs() < f64::EPSILON);
        progress.reset();
        assert!(progress.get().abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn ignores_values_that_do_not_advance(#[case] fraction: f64) {
        let progress = Progress::default();
        progress.advance(0.5);
        progress.advance(fraction);
        assert!((progress.get() - 0.5).abs() < f64::EPSILON);
    }

    #[rstest]
    fn clones_share_state_across_threads() {
        let progress = Progress::default();
        let writer = progress.clone();
        std::thread::spawn(move || writer.advance(0.9))
            .join()
            .expect("writer thread finishes");
        assert!((progress.get() - 0.9).abs() < f64::EPSILON);
    }
}
