//! The imperative shell around the pure machines.
//!
//! Everything that touches time or the host's persistence lives here:
//!
//! - **Clock**: injected wall-clock capability, read once per apply
//! - **Toggle**: one managed entity driving plan → apply → commit
//! - **Effects**: apply is also available as a Stillwater `Effect` whose
//!   environment provides the clock

mod clock;
mod toggle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use toggle::Toggle;
