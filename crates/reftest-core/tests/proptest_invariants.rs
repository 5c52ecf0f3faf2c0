#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use reftest_core::codec::{vector_from_bytes, vector_to_bytes};
use reftest_core::threshold::longest_run;
use reftest_core::{
    has_at_least_n_consecutive_samples_with_condition_true,
    has_at_least_n_samples_with_condition_true, interpolate_at_time,
    is_mean_difference_within_threshold, is_variance_within_threshold, is_within_bounds,
    is_within_time_varying_bounds, linear_interpolate,
};

const MIN_PROPTEST_CASES: u32 = 256;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn finite_series(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6_f64, 0..max_len)
}

/// Strictly increasing time base paired with values of the same length.
fn timed_series(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.001..10.0_f64, -1.0e3..1.0e3_f64), 1..max_len).prop_map(|steps| {
        let mut t = 0.0;
        steps
            .into_iter()
            .map(|(dt, v)| {
                t += dt;
                (t, v)
            })
            .unzip()
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        .. ProptestConfig::default()
    })]

    #[test]
    fn series_is_similar_to_itself(series in finite_series(64)) {
        prop_assert!(is_variance_within_threshold(&series, &series, 0.0));
        prop_assert!(is_mean_difference_within_threshold(&series, &series, 0.0));
    }

    #[test]
    fn series_is_within_its_own_bounds(series in finite_series(64)) {
        prop_assert!(is_within_bounds(&series, &series, &series));
    }

    #[test]
    fn bounds_length_mismatch_fails(series in finite_series(64), extra in -1.0..1.0_f64) {
        let mut longer = series.clone();
        longer.push(extra);
        prop_assert!(!is_within_bounds(&series, &longer, &longer));
        prop_assert!(!is_within_bounds(&longer, &series, &longer));
        prop_assert!(!is_variance_within_threshold(&series, &longer, f64::MAX));
        prop_assert!(!is_mean_difference_within_threshold(&series, &longer, f64::MAX));
    }

    #[test]
    fn interpolation_hits_samples_and_clamps(
        (time, values) in timed_series(32),
        below in 0.0..100.0_f64,
    ) {
        let first = time[0];
        let last = time[time.len() - 1];
        prop_assert_eq!(interpolate_at_time(first - below, &time, &values).unwrap(), values[0]);
        prop_assert_eq!(
            interpolate_at_time(last + below, &time, &values).unwrap(),
            values[values.len() - 1]
        );
        for (i, &t) in time.iter().enumerate() {
            let got = interpolate_at_time(t, &time, &values).unwrap();
            prop_assert!((got - values[i]).abs() <= 1e-9 * (1.0 + values[i].abs()));
        }
    }

    #[test]
    fn interpolation_stays_within_segment_range(
        (time, values) in timed_series(32),
        frac in 0.0..=1.0_f64,
    ) {
        let target = time[0] + frac * (time[time.len() - 1] - time[0]);
        let got = interpolate_at_time(target, &time, &values).unwrap();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(got >= lo - 1e-9 && got <= hi + 1e-9);
    }

    #[test]
    fn degenerate_segment_returns_left_value(
        x in -1.0e3..1.0e3_f64,
        x0 in -1.0e3..1.0e3_f64,
        y0 in -1.0e3..1.0e3_f64,
        y1 in -1.0e3..1.0e3_f64,
    ) {
        prop_assert_eq!(linear_interpolate(x, x0, y0, x0, y1), y0);
    }

    #[test]
    fn bounds_match_time_varying_bounds_on_shared_time_base(
        (time, values) in timed_series(32),
        margin in 1.0e-3..10.0_f64,
    ) {
        let min: Vec<f64> = values.iter().map(|v| v - margin).collect();
        let max: Vec<f64> = values.iter().map(|v| v + margin).collect();
        prop_assert!(is_within_bounds(&values, &min, &max));
        prop_assert!(is_within_time_varying_bounds(&time, &values, &time, &min, &time, &max));
    }

    #[test]
    fn zero_minimum_always_passes(series in finite_series(32)) {
        prop_assert!(has_at_least_n_samples_with_condition_true(&series, |_| false, 0));
        prop_assert!(has_at_least_n_consecutive_samples_with_condition_true(&series, |_| false, 0));
    }

    #[test]
    fn consecutive_implies_count(
        series in finite_series(64),
        threshold in -1.0e6..1.0e6_f64,
        n in 0usize..16,
    ) {
        let run =
            has_at_least_n_consecutive_samples_with_condition_true(&series, |v| v > threshold, n);
        let count = has_at_least_n_samples_with_condition_true(&series, |v| v > threshold, n);
        prop_assert!(!run || count);
        prop_assert_eq!(run, n == 0 || longest_run(&series, |v| v > threshold) >= n);
    }

    #[test]
    fn codec_round_trip_is_bit_identical(bits in prop::collection::vec(any::<u64>(), 0..64)) {
        // Arbitrary bit patterns, NaN payloads included.
        let data: Vec<f64> = bits.iter().map(|&b| f64::from_bits(b)).collect();
        let decoded: Vec<f64> = vector_from_bytes(&vector_to_bytes(&data).unwrap()).unwrap();
        let decoded_bits: Vec<u64> = decoded.iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(decoded_bits, bits);
    }

    #[test]
    fn codec_round_trip_f32_is_bit_identical(bits in prop::collection::vec(any::<u32>(), 0..64)) {
        let data: Vec<f32> = bits.iter().map(|&b| f32::from_bits(b)).collect();
        let decoded: Vec<f32> = vector_from_bytes(&vector_to_bytes(&data).unwrap()).unwrap();
        let decoded_bits: Vec<u32> = decoded.iter().map(|v| v.to_bits()).collect();
        prop_assert_eq!(decoded_bits, bits);
    }
}
