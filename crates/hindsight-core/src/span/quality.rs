use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality score clamped to [0.0, 100.0].
/// Higher means the span is a more trustworthy precedent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(f64);

impl Quality {
    /// Spans at or above this are considered reliable evidence.
    pub const HIGH: f64 = 80.0;

    /// Create a new Quality, clamping to [0.0, 100.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 100.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 >= Self::HIGH
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(50.0)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl From<f64> for Quality {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Quality> for f64 {
    fn from(q: Quality) -> Self {
        q.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_range() {
        assert_eq!(Quality::new(-5.0).value(), 0.0);
        assert_eq!(Quality::new(150.0).value(), 100.0);
        assert_eq!(Quality::new(85.0).value(), 85.0);
    }

    #[test]
    fn high_threshold() {
        assert!(Quality::new(90.0).is_high());
        assert!(!Quality::new(60.0).is_high());
    }
}
