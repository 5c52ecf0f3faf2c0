//! Inclusive min/max bounds predicates.
//!
//! Both predicates treat mis-shaped inputs as a failed check (`false`), never
//! as an error, so one badly sized series degrades a batch of checks instead
//! of aborting it.

use log::{debug, warn};

use crate::float::Float;
use crate::interpolate::interpolate_at_time;

#[inline]
fn within<T: Float>(value: T, min: T, max: T) -> bool {
    // NaN on either side fails both comparisons and is reported out of bounds.
    min <= value && value <= max
}

/// True when `min[i] <= test[i] <= max[i]` for every index.
///
/// Returns `false` if the three slices differ in length. Three empty slices
/// pass vacuously.
pub fn is_within_bounds<T: Float>(test: &[T], min: &[T], max: &[T]) -> bool {
    if test.len() != min.len() || test.len() != max.len() {
        warn!(
            "bounds check: length mismatch (test={}, min={}, max={})",
            test.len(),
            min.len(),
            max.len()
        );
        return false;
    }

    match test
        .iter()
        .zip(min.iter().zip(max.iter()))
        .position(|(&v, (&lo, &hi))| !within(v, lo, hi))
    {
        Some(i) => {
            debug!(
                "bounds check failed at index {i}: {} not in [{}, {}]",
                test[i], min[i], max[i]
            );
            false
        }
        None => true,
    }
}

/// Bounds check where `min` and `max` carry their own time bases.
///
/// For every candidate sample, both bounds are interpolated at
/// `test_time[i]` (see [`interpolate_at_time`]) and the inclusive test is
/// applied.
///
/// Returns `false` when any series is not the same length as its time base.
/// A non-empty candidate checked against an empty bound also fails, since
/// there is nothing to interpolate. An empty candidate passes vacuously.
pub fn is_within_time_varying_bounds<T: Float>(
    test_time: &[T],
    test: &[T],
    min_time: &[T],
    min: &[T],
    max_time: &[T],
    max: &[T],
) -> bool {
    if test_time.len() != test.len() {
        warn!(
            "time-varying bounds check: candidate time/value length mismatch ({} vs {})",
            test_time.len(),
            test.len()
        );
        return false;
    }
    if min_time.len() != min.len() || max_time.len() != max.len() {
        warn!(
            "time-varying bounds check: bound time/value length mismatch (min {} vs {}, max {} vs {})",
            min_time.len(),
            min.len(),
            max_time.len(),
            max.len()
        );
        return false;
    }

    for (i, (&t, &value)) in test_time.iter().zip(test.iter()).enumerate() {
        let (lo, hi) = match (
            interpolate_at_time(t, min_time, min),
            interpolate_at_time(t, max_time, max),
        ) {
            (Ok(lo), Ok(hi)) => (lo, hi),
            (Err(e), _) | (_, Err(e)) => {
                warn!("time-varying bounds check: cannot interpolate bounds: {e}");
                return false;
            }
        };

        if !within(value, lo, hi) {
            debug!(
                "time-varying bounds check failed at index {i} (t={t}): {value} not in [{lo}, {hi}]"
            );
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_bounds_pass() {
        let test = [1.01, 1.99, 3.02, 3.98, 5.01];
        let min = [0.5, 1.5, 2.5, 3.5, 4.5];
        let max = [1.5, 2.5, 3.5, 4.5, 5.5];
        assert!(is_within_bounds(&test, &min, &max));
    }

    #[test]
    fn bounds_are_inclusive() {
        let min = [0.0_f32, 1.0];
        let max = [1.0_f32, 2.0];
        assert!(is_within_bounds(&[0.0, 2.0], &min, &max));
        assert!(is_within_bounds(&[1.0, 1.0], &min, &max));
    }

    #[test]
    fn single_violation_fails() {
        let min = [0.0, 0.0, 0.0];
        let max = [1.0, 1.0, 1.0];
        assert!(!is_within_bounds(&[0.5, 1.0001, 0.5], &min, &max));
        assert!(!is_within_bounds(&[0.5, 0.5, -0.1], &min, &max));
    }

    #[test]
    fn nan_sample_is_out_of_bounds() {
        assert!(!is_within_bounds(&[f64::NAN], &[0.0], &[1.0]));
    }

    #[test]
    fn length_mismatch_fails() {
        assert!(!is_within_bounds(&[1.0, 2.0], &[0.0], &[3.0, 3.0]));
        assert!(!is_within_bounds(&[1.0, 2.0], &[0.0, 0.0], &[3.0]));
        assert!(!is_within_bounds(&[], &[0.0], &[3.0]));
    }

    #[test]
    fn empty_series_pass() {
        let empty: [f64; 0] = [];
        assert!(is_within_bounds(&empty, &empty, &empty));
    }

    #[test]
    fn time_varying_bounds_follow_interpolated_corridor() {
        // Candidate sampled at 10 Hz, bounds at 1 Hz.
        let test_time: Vec<f64> = (0..=20).map(|i| i as f64 * 0.1).collect();
        let test: Vec<f64> = test_time.iter().map(|t| 2.0 * t).collect();
        let min_time = [0.0, 1.0, 2.0];
        let min = [-0.5, 1.5, 3.5];
        let max_time = [0.0, 2.0];
        let max = [0.5, 4.5];

        assert!(is_within_time_varying_bounds(
            &test_time, &test, &min_time, &min, &max_time, &max
        ));

        let mut shifted = test.clone();
        shifted[15] += 0.6;
        assert!(!is_within_time_varying_bounds(
            &test_time, &shifted, &min_time, &min, &max_time, &max
        ));
    }

    #[test]
    fn time_varying_bounds_clamp_outside_bound_range() {
        let test_time = [-1.0, 5.0];
        let test = [0.0, 10.0];
        let bound_time = [0.0, 1.0];
        assert!(is_within_time_varying_bounds(
            &test_time,
            &test,
            &bound_time,
            &[-1.0, 9.0],
            &bound_time,
            &[1.0, 11.0],
        ));
    }

    #[test]
    fn time_varying_bounds_length_mismatches_fail() {
        let t = [0.0, 1.0];
        let v = [0.0, 0.0];
        assert!(!is_within_time_varying_bounds(&t, &[0.0], &t, &v, &t, &v));
        assert!(!is_within_time_varying_bounds(&t, &v, &[0.0], &v, &t, &v));
        assert!(!is_within_time_varying_bounds(&t, &v, &t, &v, &t, &[1.0]));
    }

    #[test]
    fn time_varying_bounds_empty_cases() {
        let empty: [f64; 0] = [];
        let t = [0.0, 1.0];
        assert!(is_within_time_varying_bounds(&empty, &empty, &t, &t, &t, &t));
        assert!(!is_within_time_varying_bounds(&t, &t, &empty, &empty, &t, &t));
    }
}
