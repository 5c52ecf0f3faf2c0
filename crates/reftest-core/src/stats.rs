//! Statistical-similarity predicates against a paired reference series.
//!
//! "Variance" here is the mean squared per-sample deviation of the candidate
//! from its reference, `sum((test[i] - reference[i])^2) / n`. It is not the
//! variance of either series on its own.

use log::{debug, warn};

use crate::float::Float;

/// Arithmetic mean of `series`, or `None` when it is empty.
pub fn mean<T: Float>(series: &[T]) -> Option<T> {
    if series.is_empty() {
        return None;
    }
    let mut sum = T::ZERO;
    for &v in series {
        sum += v;
    }
    Some(sum / T::from_usize(series.len()))
}

/// Mean of squared differences between paired samples.
///
/// Returns `None` when the lengths differ or both series are empty.
pub fn mean_squared_difference<T: Float>(test: &[T], reference: &[T]) -> Option<T> {
    if test.len() != reference.len() || test.is_empty() {
        return None;
    }
    let mut sum_sq = T::ZERO;
    for (&a, &b) in test.iter().zip(reference) {
        let diff = a - b;
        sum_sq += diff * diff;
    }
    Some(sum_sq / T::from_usize(test.len()))
}

/// True when the mean squared deviation from `reference` is at most
/// `threshold`.
///
/// Returns `false` on a length mismatch; two empty series pass.
pub fn is_variance_within_threshold<T: Float>(test: &[T], reference: &[T], threshold: T) -> bool {
    if test.len() != reference.len() {
        warn!(
            "variance check: length mismatch (test={}, reference={})",
            test.len(),
            reference.len()
        );
        return false;
    }

    match mean_squared_difference(test, reference) {
        None => true,
        Some(variance) => {
            let ok = variance <= threshold;
            if !ok {
                debug!("variance check failed: {variance} > {threshold}");
            }
            ok
        }
    }
}

/// True when `|mean(test) - mean(reference)| <= threshold`.
///
/// Returns `false` on a length mismatch; two empty series pass.
pub fn is_mean_difference_within_threshold<T: Float>(
    test: &[T],
    reference: &[T],
    threshold: T,
) -> bool {
    if test.len() != reference.len() {
        warn!(
            "mean-difference check: length mismatch (test={}, reference={})",
            test.len(),
            reference.len()
        );
        return false;
    }

    match (mean(test), mean(reference)) {
        (Some(a), Some(b)) => {
            let diff = (a - b).abs();
            let ok = diff <= threshold;
            if !ok {
                debug!("mean-difference check failed: |{a} - {b}| = {diff} > {threshold}");
            }
            ok
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REF: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn identical_series_pass_with_zero_threshold() {
        assert!(is_variance_within_threshold(&REF, &REF, 0.0));
        assert!(is_mean_difference_within_threshold(&REF, &REF, 0.0));
    }

    #[test]
    fn small_deviations_pass() {
        let test = [1.01, 1.99, 3.02, 3.98, 5.01];
        assert!(is_variance_within_threshold(&test, &REF, 0.01));
        assert!(is_mean_difference_within_threshold(&test, &REF, 0.1));
    }

    #[test]
    fn large_deviations_fail() {
        let test = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert!(!is_variance_within_threshold(&test, &REF, 0.1));
        assert!(!is_mean_difference_within_threshold(&test, &REF, 0.1));
    }

    #[test]
    fn constant_offset_separates_the_two_checks() {
        let shifted = [2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(is_variance_within_threshold(&shifted, &REF, 2.0));
        assert!(!is_variance_within_threshold(&shifted, &REF, 0.99));
        assert!(!is_mean_difference_within_threshold(&shifted, &REF, 0.5));
        assert!(is_mean_difference_within_threshold(&shifted, &REF, 1.0));
    }

    #[test]
    fn deviations_that_cancel_keep_mean_but_not_variance() {
        let test = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!(is_mean_difference_within_threshold(&test, &REF, 0.0));
        assert!(!is_variance_within_threshold(&test, &REF, 0.5));
    }

    #[test]
    fn length_mismatch_fails() {
        assert!(!is_variance_within_threshold(&[1.0, 2.0], &REF, 100.0));
        assert!(!is_mean_difference_within_threshold(&[1.0_f32], &[], 100.0));
    }

    #[test]
    fn empty_series_pass() {
        let empty: [f32; 0] = [];
        assert!(is_variance_within_threshold(&empty, &empty, 0.0));
        assert!(is_mean_difference_within_threshold(&empty, &empty, 0.0));
    }

    #[test]
    fn helpers() {
        assert_eq!(mean(&REF), Some(3.0));
        assert_eq!(mean::<f64>(&[]), None);
        assert_eq!(mean_squared_difference(&[1.0, 3.0], &[0.0, 0.0]), Some(5.0));
        assert_eq!(mean_squared_difference(&[1.0], &[0.0, 0.0]), None);
    }
}
