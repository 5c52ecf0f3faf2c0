//! Core engine for reference-data validation of numeric time series.
//!
//! This crate provides the building blocks used by `reftest`:
//!
//! - Piecewise-linear interpolation over a time base (`interpolate` module),
//!   used to compare series sampled at different rates.
//! - Bounds predicates with fixed or time-varying min/max series
//!   (`bounds` module).
//! - Statistical-similarity predicates comparing a candidate with a paired
//!   reference (`stats` module).
//! - Count and run-length predicates over a fixed threshold or an arbitrary
//!   caller-supplied condition (`threshold` module).
//! - A 2D corridor containment test built from per-segment half-plane checks
//!   (`corridor` module).
//! - A self-describing binary codec for persisting reference vectors
//!   (`codec` module) and a generate-or-load reference store on top of it
//!   (`reference` module).
//! - A small ledger of named check outcomes (`report` module).
//!
//! Everything except the codec and the reference store is a pure, synchronous
//! function over borrowed slices. All numeric APIs are generic over
//! [`Float`], which is implemented for `f32` and `f64` only.
#![deny(missing_docs)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod codec;
pub mod corridor;
pub mod error;
pub mod float;
pub mod interpolate;
pub mod reference;
pub mod report;
pub mod stats;
pub mod threshold;

pub use bounds::{is_within_bounds, is_within_time_varying_bounds};
pub use codec::{AnyVector, BlobHeader, CodecError, CodecErrorKind, load_vector, save_vector};
pub use corridor::{Corridor, Polyline, is_within_2d_corridor};
pub use error::CheckError;
pub use float::Float;
pub use interpolate::{interpolate_at_time, linear_interpolate};
pub use reference::{ReferenceConfig, ReferenceError, ReferenceMode, ReferenceStore};
pub use report::{CheckOutcome, CheckReport};
pub use stats::{is_mean_difference_within_threshold, is_variance_within_threshold};
pub use threshold::{
    has_at_least_n_consecutive_samples_above_threshold,
    has_at_least_n_consecutive_samples_below_threshold,
    has_at_least_n_consecutive_samples_with_condition_true,
    has_at_least_n_samples_above_threshold, has_at_least_n_samples_below_threshold,
    has_at_least_n_samples_with_condition_true,
};
