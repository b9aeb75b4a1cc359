//! Toggles: trigger-driven state machines with a plan/apply protocol
//!
//! Toggles advances one of two small deterministic machines each time an
//! external trigger value changes, and otherwise leaves state untouched:
//!
//! - **Leapfrog**: two outputs, alpha and beta, exactly one active. Each
//!   change flips the active side and stamps it with the apply time.
//! - **Rotary**: `n` outputs, exactly one active. Each change moves to the
//!   next output (wrapping around) and bumps its activation counter.
//!
//! Both follow the same two-phase protocol. `plan` is pure and produces a
//! preview in which values that depend on time are marked
//! [`Pending::Unknown`](core::Pending). `apply` resolves them with a single
//! instant and returns the committed state, which the host persists for the
//! next cycle.
//!
//! # Example
//!
//! ```rust
//! use toggles::config::LeapfrogConfig;
//! use toggles::effects::{FixedClock, Toggle};
//! use toggles::machines::{Change, Leapfrog, Side};
//! use chrono::{Duration, Utc};
//!
//! let start = Utc::now();
//! let mut toggle = Toggle::<Leapfrog>::new(LeapfrogConfig);
//!
//! let plan = toggle.plan("release-1").unwrap();
//! let state = toggle.apply_at(plan, &FixedClock(start)).unwrap();
//! toggle.commit(state).unwrap();
//!
//! let plan = toggle.plan("release-1").unwrap();
//! assert_eq!(plan.change, Change::NoOp);
//!
//! let plan = toggle.plan("release-2").unwrap();
//! let state = toggle
//!     .apply_at(plan, &FixedClock(start + Duration::seconds(1)))
//!     .unwrap();
//! toggle.commit(state).unwrap();
//! assert_eq!(toggle.state().unwrap().active, Side::Beta);
//! ```

pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod machines;
pub mod registry;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{should_transition, Pending, State};
pub use effects::{Clock, Toggle};
pub use error::ToggleError;
pub use machines::{Change, Leapfrog, Machine, Plan, Rotary};
