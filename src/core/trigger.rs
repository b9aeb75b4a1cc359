//! Trigger evaluation.
//!
//! A trigger is an opaque string supplied by the host every cycle. Its only
//! meaning is whether it differs from the value stored on the previous cycle.

/// Decide whether a cycle should move an existing machine to its next state.
///
/// An empty trigger always transitions, so a host that leaves the trigger
/// unset advances the machine on every cycle. Otherwise a transition is due
/// exactly when the trigger differs from the last one observed.
///
/// This is never consulted when a machine is first created.
///
/// # Example
///
/// ```rust
/// use toggles::core::should_transition;
///
/// assert!(!should_transition("v1", "v1"));
/// assert!(should_transition("v1", "v2"));
/// assert!(should_transition("", ""));
/// ```
pub fn should_transition(last: &str, new: &str) -> bool {
    new.is_empty() || new != last
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_trigger_does_not_transition() {
        assert!(!should_transition("initial", "initial"));
    }

    #[test]
    fn changed_trigger_transitions() {
        assert!(should_transition("initial", "changed"));
        assert!(should_transition("", "changed"));
    }

    #[test]
    fn empty_trigger_always_transitions() {
        assert!(should_transition("", ""));
        assert!(should_transition("initial", ""));
    }

    #[test]
    fn comparison_is_exact() {
        assert!(should_transition("Initial", "initial"));
        assert!(should_transition("initial", "initial "));
    }
}
