//! The plan/apply protocol and the two machines that implement it.
//!
//! # Key Concepts
//!
//! - **Plan**: pure. Computes the proposed next state from the prior state and
//!   the trigger, marking fields that can only be resolved at apply time.
//! - **Apply**: resolves pending fields with a single `now` and yields the
//!   committed state. Nothing is persisted here; that is the host's job.

pub mod leapfrog;
pub mod rotary;

use crate::core::State;
use crate::error::ToggleError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub use leapfrog::{Leapfrog, LeapfrogProposal, LeapfrogState, Side};
pub use rotary::{Rotary, RotaryState};

/// What a planned cycle will do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Change {
    /// No prior state; the machine is being created.
    Create,
    /// Trigger unchanged; the prior state is proposed verbatim.
    NoOp,
    /// Leapfrog switched its active side.
    Flip,
    /// Rotary moved to the next output.
    Advance,
}

/// Output of the plan phase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan<P> {
    pub change: Change,
    pub proposal: P,
}

impl<P> Plan<P> {
    pub fn new(change: Change, proposal: P) -> Self {
        Self { change, proposal }
    }

    /// True when applying this plan leaves the prior state untouched.
    pub fn is_noop(&self) -> bool {
        self.change == Change::NoOp
    }

    /// Convert the proposal while keeping the change.
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Plan<Q> {
        Plan {
            change: self.change,
            proposal: f(self.proposal),
        }
    }
}

/// A machine that follows the two-phase plan/apply protocol.
///
/// Implementors are marker types; all data flows through the arguments.
pub trait Machine {
    /// Machine tag, matching `State::kind` of its states.
    const KIND: &'static str;

    /// Structural parameters supplied at creation.
    type Config: Clone + Debug + Send + Sync;

    /// Proposed next state, possibly with fields pending until apply.
    type Proposal: Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;

    /// Committed, fully concrete state.
    type State: State;

    /// Compute the next proposal. Pure; never reads the clock.
    fn plan(
        config: &Self::Config,
        prior: Option<&Self::State>,
        trigger: &str,
    ) -> Result<Plan<Self::Proposal>, ToggleError>;

    /// Commit a proposal, resolving pending fields with `now`.
    ///
    /// # Errors
    ///
    /// `InconsistentState` if the resulting state breaks its invariants.
    /// `ClockRegression` if a pending timestamp would resolve to an instant
    /// not after one already carried in the proposal; hosts should retry
    /// with a later clock reading.
    fn apply(proposal: Self::Proposal, now: DateTime<Utc>) -> Result<Self::State, ToggleError>;

    /// Whether a proposal still has fields that only apply can resolve.
    fn has_pending(proposal: &Self::Proposal) -> bool;
}
