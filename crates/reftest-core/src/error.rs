//! Error type for malformed check inputs.
//!
//! Only hard precondition violations (mis-shaped interpolation or corridor
//! inputs) produce a [`CheckError`]. Length mismatches in the bounds and
//! similarity predicates are folded into a `false` verdict instead.

use snafu::prelude::*;

/// Errors from interpolation and corridor checks.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum CheckError {
    /// An input violated a documented precondition (length mismatch, too
    /// few points, empty series).
    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument {
        /// Human-readable description of the violated precondition.
        message: String,
    },
}

/// Result alias used by fallible checks.
pub type CheckResult<T> = Result<T, CheckError>;
