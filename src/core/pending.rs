//! Values that may be unknown until apply time.

use serde::{Deserialize, Serialize};

/// A proposed field that is either known at plan time or deferred to apply.
///
/// Hosts render `Unknown` as "known after apply" in their previews.
///
/// # Example
///
/// ```rust
/// use toggles::core::Pending;
///
/// let deferred: Pending<u32> = Pending::Unknown;
/// assert_eq!(deferred.resolve(7), 7);
///
/// let known = Pending::Known(3);
/// assert_eq!(known.resolve(7), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Pending<T> {
    /// Value already determined.
    Known(T),
    /// Value resolved during apply.
    Unknown,
}

impl<T> Pending<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Borrow the value if it is already known.
    pub fn known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Produce the concrete value, using `fallback` only when unknown.
    pub fn resolve(self, fallback: T) -> T {
        match self {
            Self::Known(value) => value,
            Self::Unknown => fallback,
        }
    }
}

impl<T> From<T> for Pending<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}
