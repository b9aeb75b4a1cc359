//! Host-supplied configuration for managed toggles.
//!
//! Configuration is plain `serde` data. Structural parameters are validated
//! when a machine is created; an out-of-range value aborts the cycle before
//! anything is proposed.

use crate::core::invariant::{ensure, Checked, Violation};
use crate::error::ToggleError;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

/// Smallest number of rotary outputs for which "exactly one active" is meaningful.
pub const MIN_OUTPUTS: usize = 2;

/// Largest number of rotary outputs a host may request.
pub const MAX_OUTPUTS: usize = 256;

/// Leapfrog machines have no structural parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeapfrogConfig;

/// Structural parameters of a rotary machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaryConfig {
    /// Number of outputs. Fixed at creation.
    pub n: usize,
}

impl RotaryConfig {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Check `n` against `[MIN_OUTPUTS, MAX_OUTPUTS]`.
    pub fn validate(&self) -> Result<(), ToggleError> {
        match Validation::all_vec(bounds(self.n)).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => Err(ToggleError::invalid_config(
                "n",
                violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )),
        }
    }
}

/// Range checks on an output count, shared with stored-state validation.
pub(crate) fn bounds(n: usize) -> Vec<Checked> {
    vec![
        ensure(n >= MIN_OUTPUTS, || Violation::TooFewOutputs {
            n,
            min: MIN_OUTPUTS,
        }),
        ensure(n <= MAX_OUTPUTS, || Violation::TooManyOutputs {
            n,
            max: MAX_OUTPUTS,
        }),
    ]
}

/// Untyped resource configuration as a host hands it over.
///
/// An absent trigger is treated as the empty string, which forces a
/// transition on every cycle.
///
/// # Example
///
/// ```rust
/// use toggles::config::ResourceConfig;
///
/// let config = ResourceConfig::from_json(r#"{"trigger": "v1", "n": 3}"#).unwrap();
/// assert_eq!(config.trigger(), "v1");
/// assert_eq!(config.rotary().unwrap().n, 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceConfig {
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub n: Option<usize>,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trigger value.
    pub fn with_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    /// Set the rotary output count.
    pub fn with_outputs(mut self, n: usize) -> Self {
        self.n = Some(n);
        self
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ToggleError> {
        serde_json::from_str(json).map_err(|e| ToggleError::invalid_config("config", e.to_string()))
    }

    pub fn trigger(&self) -> &str {
        self.trigger.as_deref().unwrap_or_default()
    }

    pub fn leapfrog(&self) -> LeapfrogConfig {
        LeapfrogConfig
    }

    /// Rotary parameters; `n` is required.
    pub fn rotary(&self) -> Result<RotaryConfig, ToggleError> {
        let n = self
            .n
            .ok_or_else(|| ToggleError::invalid_config("n", "required for rotary toggles"))?;
        Ok(RotaryConfig::new(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotary_bounds_accept_range() {
        assert!(RotaryConfig::new(MIN_OUTPUTS).validate().is_ok());
        assert!(RotaryConfig::new(4).validate().is_ok());
        assert!(RotaryConfig::new(MAX_OUTPUTS).validate().is_ok());
    }

    #[test]
    fn rotary_rejects_fewer_than_two() {
        for n in [0, 1] {
            match RotaryConfig::new(n).validate() {
                Err(ToggleError::InvalidConfiguration { parameter, reason }) => {
                    assert_eq!(parameter, "n");
                    assert!(reason.contains("at least 2"));
                }
                other => panic!("Expected InvalidConfiguration, got {other:?}"),
            }
        }
    }

    #[test]
    fn rotary_rejects_more_than_max() {
        let result = RotaryConfig::new(MAX_OUTPUTS + 1).validate();
        assert!(matches!(
            result,
            Err(ToggleError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn missing_trigger_is_empty() {
        let config = ResourceConfig::new();
        assert_eq!(config.trigger(), "");
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = ResourceConfig::new().with_trigger("abc").with_outputs(5);
        assert_eq!(config.trigger(), "abc");
        assert_eq!(config.rotary(), Ok(RotaryConfig::new(5)));
    }

    #[test]
    fn rotary_requires_n() {
        let result = ResourceConfig::new().rotary();
        assert!(matches!(
            result,
            Err(ToggleError::InvalidConfiguration { ref parameter, .. }) if parameter == "n"
        ));
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let result = ResourceConfig::from_json(r#"{"trigger": "x", "outputs": 3}"#);
        assert!(matches!(
            result,
            Err(ToggleError::InvalidConfiguration { ref parameter, .. }) if parameter == "config"
        ));
    }
}
