//! Two-way alternator.
//!
//! Exactly one of two sides is active. Each trigger change flips the active
//! side and stamps it with the apply time, so the pair of timestamps always
//! records which side changed last and when.

use super::{Change, Machine, Plan};
use crate::config::LeapfrogConfig;
use crate::core::invariant::{ensure, Checked, Violation};
use crate::core::{should_transition, Pending, State};
use crate::error::ToggleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// One of the two leapfrog outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Alpha,
    Beta,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Self::Alpha => Self::Beta,
            Self::Beta => Self::Alpha,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Committed leapfrog state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapfrogState {
    /// The side that changed last.
    pub active: Side,
    /// When alpha last became active.
    pub alpha_timestamp: DateTime<Utc>,
    /// When beta last became active.
    pub beta_timestamp: DateTime<Utc>,
    /// Trigger observed on the cycle that produced this state.
    pub trigger: String,
}

impl LeapfrogState {
    /// Whether the alpha output is active. Always `!self.beta()`.
    pub fn alpha(&self) -> bool {
        self.active == Side::Alpha
    }

    /// Whether the beta output is active. Always `!self.alpha()`.
    pub fn beta(&self) -> bool {
        self.active == Side::Beta
    }

    pub fn timestamp(&self, side: Side) -> DateTime<Utc> {
        match side {
            Side::Alpha => self.alpha_timestamp,
            Side::Beta => self.beta_timestamp,
        }
    }
}

impl State for LeapfrogState {
    fn kind(&self) -> &'static str {
        Leapfrog::KIND
    }

    fn trigger(&self) -> &str {
        &self.trigger
    }

    fn invariants(&self) -> Vec<Checked> {
        let active_at = self.timestamp(self.active);
        let inactive_at = self.timestamp(!self.active);
        vec![ensure(active_at >= inactive_at, || Violation::TimestampOrder {
            active: self.active.to_string(),
            active_at,
            inactive_at,
        })]
    }
}

/// Proposed leapfrog state; timestamps may be pending until apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapfrogProposal {
    pub active: Side,
    pub alpha_timestamp: Pending<DateTime<Utc>>,
    pub beta_timestamp: Pending<DateTime<Utc>>,
    pub trigger: String,
}

impl LeapfrogProposal {
    pub fn timestamp(&self, side: Side) -> Pending<DateTime<Utc>> {
        match side {
            Side::Alpha => self.alpha_timestamp,
            Side::Beta => self.beta_timestamp,
        }
    }

    fn timestamp_mut(&mut self, side: Side) -> &mut Pending<DateTime<Utc>> {
        match side {
            Side::Alpha => &mut self.alpha_timestamp,
            Side::Beta => &mut self.beta_timestamp,
        }
    }

    fn pending(&self) -> bool {
        self.alpha_timestamp.is_unknown() || self.beta_timestamp.is_unknown()
    }

    /// Newest timestamp already fixed at plan time.
    fn latest_known(&self) -> Option<DateTime<Utc>> {
        [self.alpha_timestamp, self.beta_timestamp]
            .iter()
            .filter_map(|t| t.known().copied())
            .max()
    }
}

impl From<&LeapfrogState> for LeapfrogProposal {
    fn from(state: &LeapfrogState) -> Self {
        Self {
            active: state.active,
            alpha_timestamp: Pending::Known(state.alpha_timestamp),
            beta_timestamp: Pending::Known(state.beta_timestamp),
            trigger: state.trigger.clone(),
        }
    }
}

/// The leapfrog machine.
///
/// # Example
///
/// ```rust
/// use toggles::config::LeapfrogConfig;
/// use toggles::machines::{Change, Leapfrog, Machine, Side};
/// use chrono::{Duration, Utc};
///
/// let created = Leapfrog::plan(&LeapfrogConfig, None, "v1").unwrap();
/// assert_eq!(created.change, Change::Create);
///
/// let t0 = Utc::now();
/// let state = Leapfrog::apply(created.proposal, t0).unwrap();
/// assert_eq!(state.alpha_timestamp, state.beta_timestamp);
///
/// let flipped = Leapfrog::plan(&LeapfrogConfig, Some(&state), "v2").unwrap();
/// let state = Leapfrog::apply(flipped.proposal, t0 + Duration::seconds(1)).unwrap();
/// assert_eq!(state.active, Side::Beta);
/// assert!(state.beta_timestamp > state.alpha_timestamp);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Leapfrog;

impl Machine for Leapfrog {
    const KIND: &'static str = "leapfrog";

    type Config = LeapfrogConfig;
    type Proposal = LeapfrogProposal;
    type State = LeapfrogState;

    fn plan(
        _config: &LeapfrogConfig,
        prior: Option<&LeapfrogState>,
        trigger: &str,
    ) -> Result<Plan<LeapfrogProposal>, ToggleError> {
        let Some(prior) = prior else {
            tracing::debug!(kind = Self::KIND, trigger, "planning creation");
            return Ok(Plan::new(
                Change::Create,
                LeapfrogProposal {
                    active: Side::Alpha,
                    alpha_timestamp: Pending::Unknown,
                    beta_timestamp: Pending::Unknown,
                    trigger: trigger.to_string(),
                },
            ));
        };

        prior.validate()?;

        if !should_transition(&prior.trigger, trigger) {
            tracing::debug!(kind = Self::KIND, trigger, "trigger unchanged");
            return Ok(Plan::new(Change::NoOp, LeapfrogProposal::from(prior)));
        }

        // Only the side that becomes active gets a fresh timestamp.
        let active = !prior.active;
        let mut proposal = LeapfrogProposal::from(prior);
        proposal.active = active;
        *proposal.timestamp_mut(active) = Pending::Unknown;
        proposal.trigger = trigger.to_string();

        tracing::debug!(kind = Self::KIND, from = %prior.active, to = %active, "planning flip");
        Ok(Plan::new(Change::Flip, proposal))
    }

    fn apply(proposal: LeapfrogProposal, now: DateTime<Utc>) -> Result<LeapfrogState, ToggleError> {
        if proposal.pending() {
            if let Some(latest) = proposal.latest_known() {
                if now <= latest {
                    return Err(ToggleError::ClockRegression { now, latest });
                }
            }
        }

        let state = LeapfrogState {
            active: proposal.active,
            alpha_timestamp: proposal.alpha_timestamp.resolve(now),
            beta_timestamp: proposal.beta_timestamp.resolve(now),
            trigger: proposal.trigger,
        };
        state.validate()?;

        tracing::debug!(kind = Self::KIND, active = %state.active, "applied");
        Ok(state)
    }

    fn has_pending(proposal: &LeapfrogProposal) -> bool {
        proposal.pending()
    }
}
