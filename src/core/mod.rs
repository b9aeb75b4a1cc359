//! Pure building blocks shared by both machines.
//!
//! This module contains the parts of the engine that never touch time or
//! persistence:
//! - Trigger evaluation
//! - Plan-time vs. apply-time values via `Pending`
//! - The `State` trait and invariant checks
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

pub mod invariant;
mod pending;
mod state;
mod trigger;

pub use invariant::{Checked, Violation};
pub use pending::Pending;
pub use state::State;
pub use trigger::should_transition;
