//! One managed toggle and its plan/apply/commit cycle.

use super::clock::Clock;
use crate::core::State;
use crate::error::ToggleError;
use crate::machines::{Machine, Plan};
use std::fmt::Display;
use stillwater::effect::Effect;
use stillwater::prelude::*;

/// A single managed toggle: its configuration and last committed state.
///
/// Planning is pure. Applying reads the clock once. The result only becomes
/// the committed state once the host has persisted it.
pub struct Toggle<M: Machine> {
    config: M::Config,
    state: Option<M::State>,
}

impl<M: Machine> Toggle<M> {
    /// A toggle that has never been applied.
    pub fn new(config: M::Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Resume from a state the host persisted on an earlier cycle.
    pub fn resume(config: M::Config, state: M::State) -> Result<Self, ToggleError> {
        state.validate()?;
        Ok(Self {
            config,
            state: Some(state),
        })
    }

    pub fn config(&self) -> &M::Config {
        &self.config
    }

    /// Last committed state (pure).
    pub fn state(&self) -> Option<&M::State> {
        self.state.as_ref()
    }

    /// Plan the next cycle against the committed state (pure).
    pub fn plan(&self, trigger: &str) -> Result<Plan<M::Proposal>, ToggleError> {
        M::plan(&self.config, self.state.as_ref(), trigger)
    }

    /// Apply a plan synchronously, reading `clock` once.
    pub fn apply_at<C: Clock + ?Sized>(
        &self,
        plan: Plan<M::Proposal>,
        clock: &C,
    ) -> Result<M::State, ToggleError> {
        let now = clock.now();
        M::apply(plan.proposal, now)
    }

    /// Apply a plan as an effect whose environment supplies the clock.
    /// Run it with `.run(&env).await`, then hand the result to `commit`.
    pub fn apply<Env>(
        &self,
        plan: Plan<M::Proposal>,
    ) -> impl Effect<Output = M::State, Error = ToggleError, Env = Env>
    where
        M: 'static,
        M::Proposal: 'static,
        M::State: 'static,
        Env: Clock + Clone + Send + Sync + 'static,
    {
        let proposal = plan.proposal;
        from_fn(move |env: &Env| M::apply(proposal.clone(), env.now()))
    }

    /// Accept an applied state as committed. A state that breaks its
    /// invariants is rejected and the prior state is kept.
    pub fn commit(&mut self, state: M::State) -> Result<(), ToggleError> {
        state.validate()?;
        tracing::debug!(kind = M::KIND, "committed");
        self.state = Some(state);
        Ok(())
    }

    /// Persist an applied state through the host, committing only on success.
    ///
    /// On failure the previously committed state stays authoritative.
    pub fn commit_with<F, E>(&mut self, state: M::State, persist: F) -> Result<(), ToggleError>
    where
        F: FnOnce(&M::State) -> Result<(), E>,
        E: Display,
    {
        state.validate()?;
        if let Err(e) = persist(&state) {
            tracing::warn!(kind = M::KIND, error = %e, "host failed to persist state");
            return Err(ToggleError::CommitFailure {
                reason: e.to_string(),
            });
        }
        tracing::debug!(kind = M::KIND, "committed");
        self.state = Some(state);
        Ok(())
    }

    /// Remove the toggle. Nothing external is managed, so this only hands
    /// back the last committed state.
    pub fn destroy(self) -> Option<M::State> {
        tracing::debug!(kind = M::KIND, "destroyed");
        self.state
    }
}
