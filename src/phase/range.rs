//! src/phase/range.rs
//!
//! The shared axis domain: one validated `Range` value used by both the X and
//! Y projections, so the two axes can never drift apart.

use thiserror::Error;

/// Rejected reconfiguration input. Always recoverable; the component's state
/// is never mutated when one of these is returned.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("range must be ordered: min < max (got {min}, {max})")]
    Unordered { min: f64, max: f64 },

    #[error("range must contain zero (got {min}, {max})")]
    NoZeroCross { min: f64, max: f64 },

    #[error("range bounds must be finite numbers")]
    NonFinite,

    #[error("dimension index {index} out of bounds for {dims} dimensions")]
    IndexOutOfBounds { index: i64, dims: usize },

    #[error("expected two comma-separated values, got {0:?}")]
    Malformed(String),

    #[error("could not parse {0:?} as a number")]
    BadNumber(String),
}

/// Numeric bounds shared by both plot axes.
///
/// Invariants, enforced at construction: `min < max`, both finite, and
/// `min * max <= 0` so the axes cross at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    /// Validate and construct. Invalid pairs are rejected, never clamped.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if min >= max {
            return Err(ConfigError::Unordered { min, max });
        }
        if min * max > 0.0 {
            return Err(ConfigError::NoZeroCross { min, max });
        }
        Ok(Self { min, max })
    }

    /// Parse the `"<min>,<max>"` form used by the modal dialog and the control
    /// protocol.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let mut parts = input.split(',');
        let (a, b) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => (a.trim(), b.trim()),
            _ => return Err(ConfigError::Malformed(input.to_string())),
        };
        let min: f64 = a
            .parse()
            .map_err(|_| ConfigError::BadNumber(a.to_string()))?;
        let max: f64 = b
            .parse()
            .map_err(|_| ConfigError::BadNumber(b.to_string()))?;
        Self::new(min, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// max - min (always positive).
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_zero_crossing_ranges_accepted() {
        assert!(Range::new(-5.0, 10.0).is_ok());
        assert!(Range::new(-1.0, 1.0).is_ok());
        // zero at the edge is allowed
        assert!(Range::new(0.0, 10.0).is_ok());
        assert!(Range::new(-10.0, 0.0).is_ok());
    }

    #[test]
    fn non_crossing_range_rejected() {
        assert_eq!(
            Range::new(2.0, 10.0),
            Err(ConfigError::NoZeroCross {
                min: 2.0,
                max: 10.0
            })
        );
        assert!(Range::new(-10.0, -2.0).is_err());
    }

    #[test]
    fn unordered_range_rejected() {
        assert_eq!(
            Range::new(10.0, -5.0),
            Err(ConfigError::Unordered {
                min: 10.0,
                max: -5.0
            })
        );
        assert!(Range::new(1.0, 1.0).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(Range::new(f64::NAN, 1.0), Err(ConfigError::NonFinite));
        assert_eq!(
            Range::new(f64::NEG_INFINITY, 1.0),
            Err(ConfigError::NonFinite)
        );
    }

    #[test]
    fn parse_accepts_min_comma_max() {
        assert_eq!(Range::parse("-5, 10"), Range::new(-5.0, 10.0));
        assert_eq!(Range::parse(" -1,1 "), Range::new(-1.0, 1.0));
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert!(matches!(Range::parse("5"), Err(ConfigError::Malformed(_))));
        assert!(matches!(
            Range::parse("1,2,3"),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            Range::parse("a,1"),
            Err(ConfigError::BadNumber(_))
        ));
    }
}
