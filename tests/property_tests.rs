//! Property-based tests for the leapfrog and rotary machines.
//!
//! These tests use proptest to drive machines through random trigger
//! sequences and check that every reachable state keeps its invariants.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use toggles::config::{LeapfrogConfig, RotaryConfig};
use toggles::core::{should_transition, State};
use toggles::machines::{
    Change, Leapfrog, LeapfrogProposal, LeapfrogState, Machine, Rotary, RotaryState,
};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

fn create_leapfrog(trigger: &str) -> LeapfrogState {
    let plan = Leapfrog::plan(&LeapfrogConfig, None, trigger).unwrap();
    Leapfrog::apply(plan.proposal, at(0)).unwrap()
}

fn create_rotary(n: usize, trigger: &str) -> RotaryState {
    let plan = Rotary::plan(&RotaryConfig::new(n), None, trigger).unwrap();
    Rotary::apply(plan.proposal, at(0)).unwrap()
}

prop_compose! {
    fn trigger()(value in "[ab]?") -> String {
        value
    }
}

proptest! {
    #[test]
    fn trigger_evaluation_is_deterministic(last in "[a-c]{0,2}", new in "[a-c]{0,2}") {
        prop_assert_eq!(should_transition(&last, &new), should_transition(&last, &new));
        prop_assert_eq!(should_transition(&last, &new), new.is_empty() || new != last);
    }

    #[test]
    fn leapfrog_sides_always_alternate(
        first in trigger(),
        triggers in prop::collection::vec(trigger(), 1..20)
    ) {
        let mut state = create_leapfrog(&first);

        for (i, t) in triggers.iter().enumerate() {
            let plan = Leapfrog::plan(&LeapfrogConfig, Some(&state), t).unwrap();
            state = Leapfrog::apply(plan.proposal, at(i as i64 + 1)).unwrap();

            prop_assert_eq!(state.alpha(), !state.beta());
            prop_assert!(state.timestamp(state.active) >= state.timestamp(!state.active));
            prop_assert!(state.validate().is_ok());
        }
    }

    #[test]
    fn leapfrog_flip_stamps_only_the_new_side(
        triggers in prop::collection::vec(trigger(), 1..20)
    ) {
        let mut state = create_leapfrog("start");

        for (i, t) in triggers.iter().enumerate() {
            let plan = Leapfrog::plan(&LeapfrogConfig, Some(&state), t).unwrap();
            let next = Leapfrog::apply(plan.proposal, at(i as i64 + 1)).unwrap();

            if plan.change == Change::Flip {
                prop_assert_eq!(next.active, !state.active);
                prop_assert!(next.timestamp(next.active) > state.timestamp(next.active));
                prop_assert!(next.timestamp(next.active) > next.timestamp(!next.active));
                prop_assert_eq!(next.timestamp(state.active), state.timestamp(state.active));
            } else {
                prop_assert_eq!(&next, &state);
            }
            state = next;
        }
    }

    #[test]
    fn leapfrog_unchanged_trigger_is_stable(trigger in "[a-z]{1,8}", repeats in 1..10usize) {
        let state = create_leapfrog(&trigger);
        let expected = serde_json::to_vec(&LeapfrogProposal::from(&state)).unwrap();

        for i in 0..repeats {
            let plan = Leapfrog::plan(&LeapfrogConfig, Some(&state), &trigger).unwrap();
            prop_assert!(plan.is_noop());
            prop_assert!(!Leapfrog::has_pending(&plan.proposal));
            prop_assert_eq!(serde_json::to_vec(&plan.proposal).unwrap(), expected.clone());
            prop_assert_eq!(Leapfrog::apply(plan.proposal, at(i as i64 + 1)).unwrap(), state.clone());
        }
    }

    #[test]
    fn rotary_exactly_one_output_active(
        n in 2..12usize,
        triggers in prop::collection::vec(trigger(), 0..30)
    ) {
        let config = RotaryConfig::new(n);
        let mut state = create_rotary(n, "start");

        for t in &triggers {
            let plan = Rotary::plan(&config, Some(&state), t).unwrap();
            state = Rotary::apply(plan.proposal, at(0)).unwrap();

            prop_assert_eq!(state.outputs.iter().filter(|&&o| o).count(), 1);
            prop_assert!(state.outputs[state.active]);
            prop_assert_eq!(state.outputs.len(), n);
            prop_assert_eq!(state.counters.len(), n);
        }
    }

    #[test]
    fn rotary_counters_sum_to_cycles(
        n in 2..12usize,
        triggers in prop::collection::vec(trigger(), 0..30)
    ) {
        let config = RotaryConfig::new(n);
        let mut state = create_rotary(n, "start");
        let mut advances = 0u64;

        for t in &triggers {
            let plan = Rotary::plan(&config, Some(&state), t).unwrap();
            if plan.change == Change::Advance {
                advances += 1;
            }
            state = Rotary::apply(plan.proposal, at(0)).unwrap();
        }

        prop_assert_eq!(state.counters.iter().sum::<u64>(), 1 + advances);
        prop_assert_eq!(state.active as u64, advances % n as u64);
    }

    #[test]
    fn empty_trigger_always_transitions(n in 2..8usize, repeats in 1..12usize) {
        let config = RotaryConfig::new(n);
        let mut rotary = create_rotary(n, "");
        let mut leapfrog = create_leapfrog("");

        for i in 0..repeats {
            let plan = Rotary::plan(&config, Some(&rotary), "").unwrap();
            prop_assert_eq!(plan.change, Change::Advance);
            rotary = Rotary::apply(plan.proposal, at(0)).unwrap();

            let plan = Leapfrog::plan(&LeapfrogConfig, Some(&leapfrog), "").unwrap();
            prop_assert_eq!(plan.change, Change::Flip);
            leapfrog = Leapfrog::apply(plan.proposal, at(i as i64 + 1)).unwrap();
        }

        prop_assert_eq!(rotary.active, repeats % n);
        prop_assert_eq!(leapfrog.alpha(), repeats % 2 == 0);
    }

    #[test]
    fn rotary_rejects_n_below_two(n in 0..2usize, t in trigger()) {
        prop_assert!(Rotary::plan(&RotaryConfig::new(n), None, &t).is_err());
    }
}
