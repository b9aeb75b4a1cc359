//! N-way round-robin selector.
//!
//! One of `n` outputs is active. Each trigger change moves activation to the
//! next output, wrapping from `n - 1` back to `0`, and bumps that output's
//! activation counter. Nothing about a rotary cycle depends on time, so every
//! proposed value is known at plan time.

use super::{Change, Machine, Plan};
use crate::config::{self, RotaryConfig};
use crate::core::invariant::{ensure, Checked, Violation};
use crate::core::{should_transition, State};
use crate::error::ToggleError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Committed rotary state.
///
/// `outputs` mirrors `active` for hosts that expose one boolean per output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaryState {
    /// Number of outputs. Structural; changing it requires recreation.
    pub n: usize,
    /// Index of the active output, in `[0, n)`.
    pub active: usize,
    /// `outputs[i] == (i == active)`.
    pub outputs: Vec<bool>,
    /// How many cycles ended with each output active, creation included.
    pub counters: Vec<u64>,
    /// Trigger observed on the cycle that produced this state.
    pub trigger: String,
}

impl RotaryState {
    /// Initial state: output 0 active and counted once.
    fn initial(n: usize, trigger: &str) -> Self {
        let mut counters = vec![0; n];
        counters[0] = 1;
        Self {
            n,
            active: 0,
            outputs: outputs_for(n, 0),
            counters,
            trigger: trigger.to_string(),
        }
    }

    /// The state after one advance, observing `trigger`.
    fn advanced(&self, trigger: &str) -> Result<Self, ToggleError> {
        let next = (self.active + 1) % self.n;
        let mut counters = self.counters.clone();
        counters[next] = counters[next].checked_add(1).ok_or_else(|| {
            ToggleError::InconsistentState {
                kind: Rotary::KIND.to_string(),
                violations: vec![Violation::CounterExhausted { index: next }],
            }
        })?;
        Ok(Self {
            n: self.n,
            active: next,
            outputs: outputs_for(self.n, next),
            counters,
            trigger: trigger.to_string(),
        })
    }

    /// Total cycles since creation, counting creation as one.
    pub fn cycles(&self) -> u64 {
        self.counters.iter().sum()
    }
}

fn outputs_for(n: usize, active: usize) -> Vec<bool> {
    (0..n).map(|i| i == active).collect()
}

impl State for RotaryState {
    fn kind(&self) -> &'static str {
        Rotary::KIND
    }

    fn trigger(&self) -> &str {
        &self.trigger
    }

    fn invariants(&self) -> Vec<Checked> {
        let n = self.n;
        let active = self.active;

        let mut checks = config::bounds(n);
        checks.push(ensure(active < n, || Violation::ActiveIndexOutOfRange {
            index: active,
            n,
        }));
        checks.push(ensure(self.outputs.len() == n, || {
            Violation::OutputCountMismatch {
                expected: n,
                found: self.outputs.len(),
            }
        }));
        checks.push(ensure(self.counters.len() == n, || {
            Violation::CounterCountMismatch {
                expected: n,
                found: self.counters.len(),
            }
        }));
        checks.extend(self.outputs.iter().enumerate().map(|(index, &actual)| {
            ensure(actual == (index == active), || Violation::OutputDisagrees {
                index,
                active,
                actual,
            })
        }));
        if let Some(&count) = self.counters.get(active) {
            checks.push(ensure(count > 0, || Violation::ActiveNeverCounted {
                index: active,
            }));
        }
        checks
    }
}

/// The rotary machine.
///
/// # Example
///
/// ```rust
/// use toggles::config::RotaryConfig;
/// use toggles::machines::{Machine, Rotary};
/// use chrono::Utc;
///
/// let config = RotaryConfig::new(3);
/// let plan = Rotary::plan(&config, None, "v1").unwrap();
/// let state = Rotary::apply(plan.proposal, Utc::now()).unwrap();
/// assert_eq!(state.outputs, vec![true, false, false]);
///
/// let plan = Rotary::plan(&config, Some(&state), "v2").unwrap();
/// let state = Rotary::apply(plan.proposal, Utc::now()).unwrap();
/// assert_eq!(state.active, 1);
/// assert_eq!(state.counters, vec![1, 1, 0]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Rotary;

impl Machine for Rotary {
    const KIND: &'static str = "rotary";

    type Config = RotaryConfig;
    type Proposal = RotaryState;
    type State = RotaryState;

    fn plan(
        config: &RotaryConfig,
        prior: Option<&RotaryState>,
        trigger: &str,
    ) -> Result<Plan<RotaryState>, ToggleError> {
        config.validate()?;

        let Some(prior) = prior else {
            tracing::debug!(kind = Self::KIND, n = config.n, trigger, "planning creation");
            return Ok(Plan::new(Change::Create, RotaryState::initial(config.n, trigger)));
        };

        prior.validate()?;

        if prior.n != config.n {
            return Err(ToggleError::RequiresReplacement {
                parameter: "n".to_string(),
                prior: prior.n.to_string(),
                requested: config.n.to_string(),
            });
        }

        if !should_transition(&prior.trigger, trigger) {
            tracing::debug!(kind = Self::KIND, trigger, "trigger unchanged");
            return Ok(Plan::new(Change::NoOp, prior.clone()));
        }

        let proposal = prior.advanced(trigger)?;
        tracing::debug!(
            kind = Self::KIND,
            from = prior.active,
            to = proposal.active,
            "planning advance"
        );
        Ok(Plan::new(Change::Advance, proposal))
    }

    fn apply(proposal: RotaryState, _now: DateTime<Utc>) -> Result<RotaryState, ToggleError> {
        proposal.validate()?;
        tracing::debug!(kind = Self::KIND, active = proposal.active, "applied");
        Ok(proposal)
    }

    fn has_pending(_proposal: &RotaryState) -> bool {
        false
    }
}
