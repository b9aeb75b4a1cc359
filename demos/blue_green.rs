//! Blue/Green Rollout
//!
//! This example drives a leapfrog toggle the way an infrastructure host would
//! during a blue/green rollout: alpha is "blue", beta is "green", and the
//! trigger is the release version.
//!
//! Key concepts:
//! - Plan previews the next state with timestamps pending
//! - Apply stamps the newly active side with the current time
//! - An unchanged trigger is a no-op
//!
//! Run with: cargo run --example blue_green

use toggles::config::LeapfrogConfig;
use toggles::effects::{SystemClock, Toggle};
use toggles::machines::{Leapfrog, LeapfrogState};

fn describe(state: &LeapfrogState) {
    println!(
        "  blue={} ({})  green={} ({})",
        state.alpha(),
        state.alpha_timestamp.to_rfc3339(),
        state.beta(),
        state.beta_timestamp.to_rfc3339()
    );
}

fn main() -> Result<(), toggles::ToggleError> {
    println!("=== Blue/Green Rollout ===\n");

    let mut toggle = Toggle::<Leapfrog>::new(LeapfrogConfig);

    for release in ["v1.0.0", "v1.0.0", "v1.1.0", "v1.2.0"] {
        let plan = toggle.plan(release)?;
        println!("Release {release}: {:?}", plan.change);
        println!(
            "  preview: active={}, blue pending={}, green pending={}",
            plan.proposal.active,
            plan.proposal.alpha_timestamp.is_unknown(),
            plan.proposal.beta_timestamp.is_unknown()
        );

        // Real hosts sleep between cycles; space them out so timestamps differ.
        std::thread::sleep(std::time::Duration::from_millis(5));

        let state = toggle.apply_at(plan, &SystemClock)?;
        describe(&state);
        toggle.commit(state)?;
        println!();
    }

    println!("=== Example Complete ===");
    Ok(())
}
