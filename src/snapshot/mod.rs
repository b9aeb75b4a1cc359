//! Persisted form of committed states.
//!
//! The host owns persistence. This module gives it a versioned envelope to
//! store between cycles, as JSON for readability or binary for compactness.

use crate::core::State;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable envelope around one committed state.
///
/// # Example
///
/// ```rust
/// use toggles::config::RotaryConfig;
/// use toggles::machines::{Machine, Rotary, RotaryState};
/// use toggles::snapshot::Snapshot;
/// use chrono::Utc;
///
/// let plan = Rotary::plan(&RotaryConfig::new(3), None, "v1").unwrap();
/// let state = Rotary::apply(plan.proposal, Utc::now()).unwrap();
///
/// let json = Snapshot::new(state.clone()).to_json().unwrap();
/// let restored: RotaryState = Snapshot::from_json(&json).unwrap().into_state().unwrap();
/// assert_eq!(restored, state);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State> {
    /// Snapshot format version
    pub version: u32,

    /// Machine tag of the stored state
    pub kind: String,

    /// The committed state
    pub state: S,
}

impl<S: State> Snapshot<S> {
    pub fn new(state: S) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            kind: state.kind().to_string(),
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_envelope()?;
        Ok(snapshot)
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_envelope()?;
        Ok(snapshot)
    }

    /// Unwrap the state after validating its invariants.
    pub fn into_state(self) -> Result<S, SnapshotError> {
        self.state.validate()?;
        Ok(self.state)
    }

    fn check_envelope(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        let expected = self.state.kind();
        if self.kind != expected {
            return Err(SnapshotError::KindMismatch {
                expected: expected.to_string(),
                found: self.kind.clone(),
            });
        }
        Ok(())
    }
}
