//! Error types for planning and applying toggle cycles.

use crate::core::Violation;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced to the host by `plan` and `apply`.
///
/// None of these are retried internally. A cycle that fails leaves the prior
/// committed state as ground truth.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToggleError {
    /// A structural parameter is missing or out of range.
    #[error("Invalid configuration for '{parameter}': {reason}")]
    InvalidConfiguration { parameter: String, reason: String },

    /// A prior state breaks one or more documented invariants.
    #[error("Inconsistent {kind} state: {}", format_violations(.violations))]
    InconsistentState {
        kind: String,
        violations: Vec<Violation>,
    },

    /// A structural parameter changed; the entity must be destroyed and recreated.
    #[error("Changing '{parameter}' from {prior} to {requested} requires replacement")]
    RequiresReplacement {
        parameter: String,
        prior: String,
        requested: String,
    },

    /// Apply was handed an instant that does not move past the carried-over timestamps.
    #[error("Clock regression: apply time {now} is not after {latest}")]
    ClockRegression {
        now: DateTime<Utc>,
        latest: DateTime<Utc>,
    },

    /// The host failed to persist a committed state.
    #[error("Commit failed: {reason}")]
    CommitFailure { reason: String },
}

impl ToggleError {
    pub(crate) fn invalid_config(parameter: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
