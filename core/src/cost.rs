use std::fmt;

use serde::{Deserialize, Serialize};

use crate::graph::Weight;

/// Path cost as seen from a forwarding table.
///
/// Ordering puts every finite cost below `Unreachable`, so a `Cost` can be
/// compared directly during relaxation without an integer sentinel.
/// Serialized as a nullable integer (`null` = unreachable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<u64>", into = "Option<u64>")]
pub enum Cost {
    Finite(u64),
    Unreachable,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0);

    pub fn is_reachable(self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// The finite value, or None when unreachable.
    pub fn value(self) -> Option<u64> {
        match self {
            Cost::Finite(c) => Some(c),
            Cost::Unreachable => None,
        }
    }

    /// Extend a path by one link. Unreachable stays unreachable; finite sums
    /// saturate rather than wrap.
    pub fn add_weight(self, weight: Weight) -> Cost {
        match self {
            Cost::Finite(c) => Cost::Finite(c.saturating_add(u64::from(weight))),
            Cost::Unreachable => Cost::Unreachable,
        }
    }
}

impl Default for Cost {
    fn default() -> Self {
        Cost::Unreachable
    }
}

impl From<Option<u64>> for Cost {
    fn from(v: Option<u64>) -> Self {
        v.map_or(Cost::Unreachable, Cost::Finite)
    }
}

impl From<Cost> for Option<u64> {
    fn from(c: Cost) -> Self {
        c.value()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(c) => f.pad(&c.to_string()),
            Cost::Unreachable => f.pad("unreachable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_below_unreachable() {
        assert!(Cost::Finite(u64::MAX) < Cost::Unreachable);
        assert!(Cost::Finite(3) < Cost::Finite(4));
        assert_eq!(Cost::ZERO.min(Cost::Unreachable), Cost::ZERO);
    }

    #[test]
    fn test_add_weight() {
        assert_eq!(Cost::Finite(2).add_weight(3), Cost::Finite(5));
        assert_eq!(Cost::Unreachable.add_weight(3), Cost::Unreachable);
        // No wraparound near the top of the range
        assert_eq!(Cost::Finite(u64::MAX - 1).add_weight(10), Cost::Finite(u64::MAX));
    }

    #[test]
    fn test_value_and_reachability() {
        assert_eq!(Cost::Finite(7).value(), Some(7));
        assert_eq!(Cost::Unreachable.value(), None);
        assert!(Cost::ZERO.is_reachable());
        assert!(!Cost::default().is_reachable());
    }

    #[test]
    fn test_serde_nullable() {
        assert_eq!(serde_json::to_string(&Cost::Finite(6)).unwrap(), "6");
        assert_eq!(serde_json::to_string(&Cost::Unreachable).unwrap(), "null");
        let c: Cost = serde_json::from_str("null").unwrap();
        assert_eq!(c, Cost::Unreachable);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::Finite(12).to_string(), "12");
        assert_eq!(Cost::Unreachable.to_string(), "unreachable");
        assert_eq!(format!("{:>4}", Cost::Finite(6)), "   6");
    }
}
