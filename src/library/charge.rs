use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Precursor charge state.
///
/// Charges compare by numeric value, so `2` and `2.0` in a library are the
/// same precursor. Always finite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Charge(f64);

impl Charge {
    /// Returns `None` for NaN and infinities
    pub fn new(value: f64) -> Option<Self> {
        // -0.0 and 0.0 must hash alike
        value.is_finite().then_some(Self(value + 0.0))
    }

    /// Numeric value
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for Charge {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Charge {}

impl Hash for Charge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Charge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Charge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i32> for Charge {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<Charge> for f64 {
    fn from(charge: Charge) -> Self {
        charge.0
    }
}

impl TryFrom<f64> for Charge {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("charge must be finite, got {value}"))
    }
}
