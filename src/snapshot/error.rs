//! Snapshot error types.

use crate::error::ToggleError;
use thiserror::Error;

/// Ways a persisted toggle state can fail to round-trip through the host.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The committed state could not be encoded for the host's store
    #[error("Could not encode toggle state: {0}")]
    SerializationFailed(String),

    /// The stored document is not a readable toggle snapshot
    #[error("Could not decode stored toggle state: {0}")]
    DeserializationFailed(String),

    /// Stored by a newer or older envelope layout than this crate reads
    #[error("Stored toggle state uses envelope version {found}, this build reads {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot holds a different machine's state
    #[error("Snapshot holds {found} state, expected {expected}")]
    KindMismatch { expected: String, found: String },

    /// Snapshot state failed validation
    #[error("Snapshot validation failed: {0}")]
    ValidationFailed(#[from] ToggleError),
}
