//! Analysis results describing the language matched by a term.
//!
//! These are plain value types. They are produced by [`RegexSolver::get_details`]
//! and never validated client-side beyond what the wire mapping requires.
//!
//! [`RegexSolver::get_details`]: crate::client::RegexSolver::get_details

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of strings matched by a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Cardinality {
    /// The term matches infinitely many strings
    Infinite,
    /// Finite, but too large to be represented as an integer
    BigInteger,
    /// Exact finite count
    Integer(u64),
}

impl Cardinality {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Cardinality::Infinite)
    }

    /// The exact count, only available for [`Cardinality::Integer`]
    pub fn value(&self) -> Option<u64> {
        match self {
            Cardinality::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Infinite => write!(f, "Infinite"),
            Cardinality::BigInteger => write!(f, "BigInteger"),
            Cardinality::Integer(value) => write!(f, "Integer({})", value),
        }
    }
}

/// Length bounds of the matched strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Length {
    /// Length of the shortest matched string, `None` if the term matches nothing
    pub minimum: Option<u64>,
    /// Length of the longest matched string, `None` if unbounded
    pub maximum: Option<u64>,
}

impl Length {
    pub fn new(minimum: Option<u64>, maximum: Option<u64>) -> Self {
        Self { minimum, maximum }
    }

    pub fn is_bounded(&self) -> bool {
        self.maximum.is_some()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Length[minimum={}, maximum={}]",
            DisplayBound(self.minimum),
            DisplayBound(self.maximum)
        )
    }
}

/// Renders an absent bound as `none`
struct DisplayBound(Option<u64>);

impl fmt::Display for DisplayBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(bound) => write!(f, "{}", bound),
            None => f.write_str("none"),
        }
    }
}

/// Snapshot of a term's properties at the time it was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    cardinality: Cardinality,
    length: Length,
    empty: bool,
    total: bool,
}

impl Details {
    pub fn new(cardinality: Cardinality, length: Length, empty: bool, total: bool) -> Self {
        Self {
            cardinality,
            length,
            empty,
            total,
        }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn length(&self) -> Length {
        self.length
    }

    /// True if the term matches no string at all
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// True if the term matches every possible string
    pub fn is_total(&self) -> bool {
        self.total
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Details[cardinality={}, length={}, empty={}, total={}]",
            self.cardinality, self.length, self.empty, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_is_infinite() {
        assert!(Cardinality::Infinite.is_infinite());
        assert!(!Cardinality::BigInteger.is_infinite());
        assert!(!Cardinality::Integer(2).is_infinite());
    }

    #[test]
    fn test_cardinality_value_only_for_integer() {
        assert_eq!(Cardinality::Integer(2).value(), Some(2));
        assert_eq!(Cardinality::Infinite.value(), None);
        assert_eq!(Cardinality::BigInteger.value(), None);
    }

    #[test]
    fn test_cardinality_display() {
        assert_eq!(Cardinality::Integer(2).to_string(), "Integer(2)");
        assert_eq!(Cardinality::Infinite.to_string(), "Infinite");
        assert_eq!(Cardinality::BigInteger.to_string(), "BigInteger");
    }

    #[test]
    fn test_length_display_unbounded() {
        let length = Length::new(Some(1), None);
        assert!(!length.is_bounded());
        assert_eq!(length.to_string(), "Length[minimum=1, maximum=none]");
    }

    #[test]
    fn test_length_display_empty_language() {
        let length = Length::new(None, None);
        assert_eq!(length.to_string(), "Length[minimum=none, maximum=none]");
    }

    #[test]
    fn test_details_display() {
        let details = Details::new(Cardinality::Integer(2), Length::new(Some(2), Some(3)), false, false);
        assert_eq!(
            details.to_string(),
            "Details[cardinality=Integer(2), length=Length[minimum=2, maximum=3], empty=false, total=false]"
        );
    }

    #[test]
    fn test_details_persist_as_json() {
        let details = Details::new(Cardinality::Infinite, Length::new(Some(0), None), false, true);
        let json = serde_json::to_string(&details).unwrap();
        let restored: Details = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, details);
        assert!(restored.is_total());
    }
}
