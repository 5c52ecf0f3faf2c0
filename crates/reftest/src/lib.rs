//! # reftest
//!
//! Reference-data validation for numerically produced time series.
//!
//! This crate is the supported public entry point. It re-exports the checks,
//! the binary reference codec and the generate-or-verify reference store from
//! `reftest-core`.
//!
//! ## Example
//!
//! ```rust
//! use reftest::prelude::*;
//!
//! let t = [0.0, 1.0, 2.0, 3.0, 4.0];
//! let v = [0.0, 10.0, 5.0, 15.0, 20.0];
//! assert_eq!(interpolate_at_time(1.5, &t, &v).unwrap(), 7.5);
//!
//! let mut report = CheckReport::new();
//! report.expect("runs", has_at_least_n_consecutive_samples_above_threshold(&v, 4.0, 3));
//! assert!(report.all_passed());
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Binary reference-vector codec.
pub mod codec {
    pub use reftest_core::codec::{
        AnyVector, BlobHeader, CodecError, CodecErrorKind, FormatError, MAX_TYPE_TAG_LEN,
        load_any_vector, load_header, load_vector, read_any_vector, read_header, read_vector,
        save_vector, vector_from_bytes, vector_to_bytes, write_vector,
    };
}

/// Count and run-length predicates, including the run-length helper.
pub mod threshold {
    pub use reftest_core::threshold::*;
}

pub use reftest_core::bounds::{is_within_bounds, is_within_time_varying_bounds};
pub use reftest_core::corridor::{Corridor, Polyline, is_within_2d_corridor};
pub use reftest_core::error::{CheckError, CheckResult};
pub use reftest_core::float::Float;
pub use reftest_core::interpolate::{interpolate_at_time, linear_interpolate};
pub use reftest_core::reference::{
    DIR_ENV, MODE_ENV, ParseReferenceModeError, ReferenceConfig, ReferenceError, ReferenceMode,
    ReferenceStore,
};
pub use reftest_core::report::{CheckOutcome, CheckReport};
pub use reftest_core::stats::{
    is_mean_difference_within_threshold, is_variance_within_threshold, mean,
    mean_squared_difference,
};
