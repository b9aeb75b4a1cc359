//! Static table of resource types a host can manage.
//!
//! Hosts address machines by type name (`toggles_leapfrog`,
//! `toggles_rotary`) and exchange states as `AnyState`. The table is
//! immutable; there is no registration at runtime.

use crate::config::ResourceConfig;
use crate::core::invariant::Violation;
use crate::core::State;
use crate::error::ToggleError;
use crate::machines::{
    Leapfrog, LeapfrogProposal, LeapfrogState, Machine, Plan, Rotary, RotaryState,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A committed state of any machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyState {
    Leapfrog(LeapfrogState),
    Rotary(RotaryState),
}

impl AnyState {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leapfrog(state) => state.kind(),
            Self::Rotary(state) => state.kind(),
        }
    }
}

/// A proposal from any machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnyProposal {
    Leapfrog(LeapfrogProposal),
    Rotary(RotaryState),
}

impl AnyProposal {
    pub fn has_pending(&self) -> bool {
        match self {
            Self::Leapfrog(proposal) => Leapfrog::has_pending(proposal),
            Self::Rotary(proposal) => Rotary::has_pending(proposal),
        }
    }
}

type PlanFn = fn(&ResourceConfig, Option<&AnyState>) -> Result<Plan<AnyProposal>, ToggleError>;

/// One entry of the resource table.
pub struct ResourceType {
    /// Host-facing type name.
    pub name: &'static str,
    /// Machine tag of the states this type produces.
    pub kind: &'static str,
    plan: PlanFn,
}

impl ResourceType {
    /// Plan a cycle for this resource type.
    pub fn plan(
        &self,
        config: &ResourceConfig,
        prior: Option<&AnyState>,
    ) -> Result<Plan<AnyProposal>, ToggleError> {
        (self.plan)(config, prior)
    }
}

/// Every resource type, keyed by host-facing name.
pub static RESOURCE_TYPES: [ResourceType; 2] = [
    ResourceType {
        name: "toggles_leapfrog",
        kind: Leapfrog::KIND,
        plan: plan_leapfrog,
    },
    ResourceType {
        name: "toggles_rotary",
        kind: Rotary::KIND,
        plan: plan_rotary,
    },
];

/// Find a resource type by its host-facing name.
///
/// # Example
///
/// ```rust
/// use toggles::config::ResourceConfig;
/// use toggles::registry::{apply, lookup};
/// use chrono::Utc;
///
/// let rotary = lookup("toggles_rotary").unwrap();
/// let config = ResourceConfig::new().with_trigger("v1").with_outputs(3);
/// let plan = rotary.plan(&config, None).unwrap();
/// let state = apply(plan.proposal, Utc::now()).unwrap();
/// assert_eq!(state.kind(), "rotary");
///
/// assert!(lookup("toggles_unknown").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static ResourceType> {
    RESOURCE_TYPES.iter().find(|t| t.name == name)
}

/// Apply a proposal from any machine.
pub fn apply(proposal: AnyProposal, now: DateTime<Utc>) -> Result<AnyState, ToggleError> {
    match proposal {
        AnyProposal::Leapfrog(p) => Leapfrog::apply(p, now).map(AnyState::Leapfrog),
        AnyProposal::Rotary(p) => Rotary::apply(p, now).map(AnyState::Rotary),
    }
}

fn kind_mismatch(expected: &str, found: &AnyState) -> ToggleError {
    ToggleError::InconsistentState {
        kind: expected.to_string(),
        violations: vec![Violation::KindMismatch {
            expected: expected.to_string(),
            found: found.kind().to_string(),
        }],
    }
}

fn plan_leapfrog(
    config: &ResourceConfig,
    prior: Option<&AnyState>,
) -> Result<Plan<AnyProposal>, ToggleError> {
    let prior = match prior {
        None => None,
        Some(AnyState::Leapfrog(state)) => Some(state),
        Some(other) => return Err(kind_mismatch(Leapfrog::KIND, other)),
    };
    Leapfrog::plan(&config.leapfrog(), prior, config.trigger()).map(|p| p.map(AnyProposal::Leapfrog))
}

fn plan_rotary(
    config: &ResourceConfig,
    prior: Option<&AnyState>,
) -> Result<Plan<AnyProposal>, ToggleError> {
    let prior = match prior {
        None => None,
        Some(AnyState::Rotary(state)) => Some(state),
        Some(other) => return Err(kind_mismatch(Rotary::KIND, other)),
    };
    Rotary::plan(&config.rotary()?, prior, config.trigger()).map(|p| p.map(AnyProposal::Rotary))
}
