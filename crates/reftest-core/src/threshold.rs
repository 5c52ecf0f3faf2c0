//! Count and run-length predicates.
//!
//! Every predicate comes in two shapes:
//!
//! - *count*: at least `n` samples satisfy the condition anywhere in the
//!   series;
//! - *consecutive*: at least `n` samples satisfy it back to back. The running
//!   streak resets whenever a sample fails, and the scan stops as soon as the
//!   streak reaches `n`.
//!
//! A required minimum of zero always passes, including on an empty series.
//! The fixed-threshold variants compare strictly (`>` / `<`).

use crate::float::Float;

/// True when at least `min_samples` elements satisfy `condition`.
pub fn has_at_least_n_samples_with_condition_true<T, F>(
    series: &[T],
    mut condition: F,
    min_samples: usize,
) -> bool
where
    T: Float,
    F: FnMut(T) -> bool,
{
    if min_samples == 0 {
        return true;
    }
    let mut count = 0usize;
    for &v in series {
        if condition(v) {
            count += 1;
            if count >= min_samples {
                return true;
            }
        }
    }
    false
}

/// True when at least `min_consecutive` adjacent elements satisfy
/// `condition`.
pub fn has_at_least_n_consecutive_samples_with_condition_true<T, F>(
    series: &[T],
    mut condition: F,
    min_consecutive: usize,
) -> bool
where
    T: Float,
    F: FnMut(T) -> bool,
{
    if min_consecutive == 0 {
        return true;
    }
    let mut streak = 0usize;
    for &v in series {
        if condition(v) {
            streak += 1;
            if streak >= min_consecutive {
                return true;
            }
        } else {
            streak = 0;
        }
    }
    false
}

/// Length of the longest run of adjacent elements satisfying `condition`.
pub fn longest_run<T, F>(series: &[T], mut condition: F) -> usize
where
    T: Float,
    F: FnMut(T) -> bool,
{
    let mut best = 0usize;
    let mut streak = 0usize;
    for &v in series {
        if condition(v) {
            streak += 1;
            best = best.max(streak);
        } else {
            streak = 0;
        }
    }
    best
}

/// True when at least `min_samples` elements are strictly greater than
/// `threshold`.
pub fn has_at_least_n_samples_above_threshold<T: Float>(
    series: &[T],
    threshold: T,
    min_samples: usize,
) -> bool {
    has_at_least_n_samples_with_condition_true(series, |v| v > threshold, min_samples)
}

/// True when at least `min_samples` elements are strictly less than
/// `threshold`.
pub fn has_at_least_n_samples_below_threshold<T: Float>(
    series: &[T],
    threshold: T,
    min_samples: usize,
) -> bool {
    has_at_least_n_samples_with_condition_true(series, |v| v < threshold, min_samples)
}

/// True when at least `min_consecutive` adjacent elements are strictly
/// greater than `threshold`.
pub fn has_at_least_n_consecutive_samples_above_threshold<T: Float>(
    series: &[T],
    threshold: T,
    min_consecutive: usize,
) -> bool {
    has_at_least_n_consecutive_samples_with_condition_true(
        series,
        |v| v > threshold,
        min_consecutive,
    )
}

/// True when at least `min_consecutive` adjacent elements are strictly less
/// than `threshold`.
pub fn has_at_least_n_consecutive_samples_below_threshold<T: Float>(
    series: &[T],
    threshold: T,
    min_consecutive: usize,
) -> bool {
    has_at_least_n_consecutive_samples_with_condition_true(
        series,
        |v| v < threshold,
        min_consecutive,
    )
}
