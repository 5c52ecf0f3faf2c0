//! Piecewise-linear lookup over a time base.
//!
//! Semantics:
//!
//! - Targets at or before the first time stamp return the first value, and
//!   targets at or after the last time stamp return the last value (flat
//!   extrapolation, never linear extension).
//! - Inside the range the first bracketing segment `[t[i], t[i+1]]` wins and
//!   the value is interpolated linearly.
//! - A zero-width segment (`t[i] == t[i+1]`) yields its left value.
//!
//! The time base is assumed to be non-decreasing. This is not validated; on
//! an unsorted time base the first bracketing segment still wins. A NaN
//! target or time-base entry can leave no bracket, which yields the last
//! value.

use crate::error::{CheckResult, InvalidArgumentSnafu};
use crate::float::Float;

/// Evaluate the line through `(x0, y0)` and `(x1, y1)` at `x`.
///
/// Returns `y0` when `x1 == x0` instead of dividing by zero.
#[inline]
pub fn linear_interpolate<T: Float>(x: T, x0: T, y0: T, x1: T, y1: T) -> T {
    if x1 == x0 {
        return y0;
    }
    y0 + (y1 - y0) * (x - x0) / (x1 - x0)
}

/// Interpolate `values` (indexed by `time_base`) at `target_time`.
///
/// # Errors
///
/// Returns [`CheckError::InvalidArgument`](crate::CheckError::InvalidArgument)
/// when the two slices differ in length or are empty.
pub fn interpolate_at_time<T: Float>(
    target_time: T,
    time_base: &[T],
    values: &[T],
) -> CheckResult<T> {
    if time_base.len() != values.len() || time_base.is_empty() {
        return InvalidArgumentSnafu {
            message: format!(
                "time and value series must have the same non-zero length (time={}, values={})",
                time_base.len(),
                values.len()
            ),
        }
        .fail();
    }

    let last = time_base.len() - 1;
    if target_time <= time_base[0] {
        return Ok(values[0]);
    }
    if target_time >= time_base[last] {
        return Ok(values[last]);
    }

    let bracket = time_base
        .windows(2)
        .position(|w| target_time >= w[0] && target_time <= w[1]);

    Ok(match bracket {
        Some(i) => linear_interpolate(
            target_time,
            time_base[i],
            values[i],
            time_base[i + 1],
            values[i + 1],
        ),
        // No segment brackets a NaN, so NaN times land here.
        None => values[last],
    })
}
