//! Core State trait for committed machine states.
//!
//! Every committed state can name its machine, report the trigger it last
//! observed, and check its own invariants without side effects.

use super::invariant::{conclude, Checked};
use crate::error::ToggleError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait for committed machine states.
///
/// All methods are pure. States are immutable values passed into `plan`
/// and returned from `apply`; the host owns their persistence.
///
/// # Required Traits
///
/// - `Clone`: proposals are derived from copies of the prior state
/// - `PartialEq`: no-op plans are compared against the prior state
/// - `Debug`: states must be debuggable for diagnostics
/// - `Serialize` + `DeserializeOwned`: hosts persist states between cycles
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {
    /// Machine tag for display/logging, e.g. `"leapfrog"`.
    fn kind(&self) -> &'static str;

    /// The trigger observed on the cycle that produced this state.
    fn trigger(&self) -> &str;

    /// Run every invariant check for this state.
    fn invariants(&self) -> Vec<Checked>;

    /// Validate the state, reporting all broken invariants together.
    fn validate(&self) -> Result<(), ToggleError> {
        conclude(self.kind(), self.invariants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::invariant::{ensure, Violation};
    use serde::Deserialize;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    struct Dial {
        position: usize,
        stops: usize,
        trigger: String,
    }

    impl State for Dial {
        fn kind(&self) -> &'static str {
            "dial"
        }

        fn trigger(&self) -> &str {
            &self.trigger
        }

        fn invariants(&self) -> Vec<Checked> {
            vec![ensure(self.position < self.stops, || {
                Violation::ActiveIndexOutOfRange {
                    index: self.position,
                    n: self.stops,
                }
            })]
        }
    }

    #[test]
    fn valid_state_passes() {
        let dial = Dial {
            position: 1,
            stops: 3,
            trigger: "t".to_string(),
        };
        assert!(dial.validate().is_ok());
        assert_eq!(dial.trigger(), "t");
    }

    #[test]
    fn invalid_state_reports_kind() {
        let dial = Dial {
            position: 3,
            stops: 3,
            trigger: String::new(),
        };

        match dial.validate() {
            Err(ToggleError::InconsistentState { kind, violations }) => {
                assert_eq!(kind, "dial");
                assert_eq!(violations.len(), 1);
            }
            other => panic!("Expected InconsistentState, got {other:?}"),
        }
    }
}
