//! Wrapper prelude.
//!
//! Downstream validation code should prefer importing from this prelude
//! instead of depending on `reftest-core` module paths.

pub use crate::codec::{AnyVector, CodecError, CodecErrorKind, load_vector, save_vector};
pub use crate::threshold::{
    has_at_least_n_consecutive_samples_above_threshold,
    has_at_least_n_consecutive_samples_below_threshold,
    has_at_least_n_consecutive_samples_with_condition_true,
    has_at_least_n_samples_above_threshold, has_at_least_n_samples_below_threshold,
    has_at_least_n_samples_with_condition_true,
};
pub use crate::{
    CheckError, CheckOutcome, CheckReport, Corridor, Float, Polyline, ReferenceConfig,
    ReferenceError, ReferenceMode, ReferenceStore, interpolate_at_time,
    is_mean_difference_within_threshold, is_variance_within_threshold, is_within_2d_corridor,
    is_within_bounds, is_within_time_varying_bounds,
};
