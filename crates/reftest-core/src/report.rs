//! Named check outcomes.
//!
//! Predicates return plain verdicts. A [`CheckReport`] collects them under a
//! name, logs each one, and summarizes the run, so a validation script can
//! keep going after a failure and report everything at the end.

use std::fmt;

use log::{info, warn};
use serde::Serialize;

/// One recorded check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Caller-supplied check name.
    pub name: String,
    /// Verdict.
    pub passed: bool,
    /// Error text when the check could not be evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered ledger of check outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict and return it unchanged.
    pub fn expect(&mut self, name: impl Into<String>, passed: bool) -> bool {
        let name = name.into();
        if passed {
            info!("[PASS] {name}");
        } else {
            warn!("[FAIL] {name}");
        }
        self.outcomes.push(CheckOutcome {
            name,
            passed,
            detail: None,
        });
        passed
    }

    /// Record the result of a fallible check. An error counts as a failure
    /// and its message is kept as the outcome's detail.
    pub fn expect_ok<E: fmt::Display>(
        &mut self,
        name: impl Into<String>,
        result: Result<bool, E>,
    ) -> bool {
        match result {
            Ok(passed) => self.expect(name, passed),
            Err(e) => {
                let name = name.into();
                let detail = e.to_string();
                warn!("[FAIL] {name}: {detail}");
                self.outcomes.push(CheckOutcome {
                    name,
                    passed: false,
                    detail: Some(detail),
                });
                false
            }
        }
    }

    /// Number of passed checks.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// Number of failed checks.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True when nothing failed. An empty report passes.
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Recorded outcomes in insertion order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// `"N passed, M failed"`.
    pub fn summary(&self) -> String {
        format!("{} passed, {} failed", self.passed(), self.failed())
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for o in &self.outcomes {
            let status = if o.passed { "PASS" } else { "FAIL" };
            match &o.detail {
                Some(detail) => writeln!(f, "[{status}] {}: {detail}", o.name)?,
                None => writeln!(f, "[{status}] {}", o.name)?,
            }
        }
        write!(f, "{}", self.summary())
    }
}
