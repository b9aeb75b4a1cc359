//! Invariant checks over stored state.
//!
//! Checks use `Validation` so a corrupted state reports every broken
//! invariant at once instead of only the first.

use crate::error::ToggleError;
use chrono::{DateTime, Utc};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Outcome of one or more invariant checks.
pub type Checked = Validation<(), NonEmptyVec<Violation>>;

/// A single broken invariant.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("n must be at least {min}, got {n}")]
    TooFewOutputs { n: usize, min: usize },

    #[error("n must be at most {max}, got {n}")]
    TooManyOutputs { n: usize, max: usize },

    #[error("expected {expected} outputs, found {found}")]
    OutputCountMismatch { expected: usize, found: usize },

    #[error("expected {expected} counters, found {found}")]
    CounterCountMismatch { expected: usize, found: usize },

    #[error("active index {index} is outside [0, {n})")]
    ActiveIndexOutOfRange { index: usize, n: usize },

    #[error("output {index} is {actual} but active index is {active}")]
    OutputDisagrees {
        index: usize,
        active: usize,
        actual: bool,
    },

    #[error("active output {index} has a zero activation counter")]
    ActiveNeverCounted { index: usize },

    #[error("activation counter of output {index} cannot be incremented further")]
    CounterExhausted { index: usize },

    #[error("active side {active} last changed at {active_at}, before inactive side at {inactive_at}")]
    TimestampOrder {
        active: String,
        active_at: DateTime<Utc>,
        inactive_at: DateTime<Utc>,
    },

    #[error("expected {expected} state, found {found}")]
    KindMismatch { expected: String, found: String },
}

/// Pass when `holds`, otherwise fail with `violation`.
pub fn ensure(holds: bool, violation: impl FnOnce() -> Violation) -> Checked {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Combine checks, accumulating every failure into one `InconsistentState`.
pub fn conclude(kind: &str, checks: Vec<Checked>) -> Result<(), ToggleError> {
    match Validation::all_vec(checks).map(|_| ()) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(violations) => {
            let violations: Vec<Violation> = violations.iter().cloned().collect();
            tracing::warn!(kind, count = violations.len(), "rejected inconsistent state");
            Err(ToggleError::InconsistentState {
                kind: kind.to_string(),
                violations,
            })
        }
    }
}
