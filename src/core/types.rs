//! Core type definitions used throughout the codebase
//!
//! Every identifier is a string newtype ordered byte-wise. That ordering is
//! the single comparator used wherever iteration order can reach an output.

use derive_more::Display;
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Display,
            Clone,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Smallest territorial cell of the adjacency graph
    UnitId
);

string_id!(
    /// Coarse cluster of units; the allocation granularity above a unit
    RegionId
);

string_id!(
    /// A side in the conflict
    FactionId
);

string_id!(
    /// A formation (brigade, corps command element, support element).
    /// Corps are identified by the id of their command formation.
    FormationId
);

/// Game turn counter
pub type Turn = u32;

/// Undirected adjacency between two units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: UnitId,
    pub b: UnitId,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: UnitId::new(a),
            b: UnitId::new(b),
        }
    }

    /// Endpoints ordered so the smaller id comes first
    pub fn normalized(&self) -> (&UnitId, &UnitId) {
        if self.a <= self.b {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }
}

/// Stable key for an adjacency, `"a:b"` with `a < b`
pub fn adjacency_key(x: &UnitId, y: &UnitId) -> String {
    if x <= y {
        format!("{}:{}", x, y)
    } else {
        format!("{}:{}", y, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_order_bytewise() {
        let mut ids = vec![
            UnitId::new("b"),
            UnitId::new("B"),
            UnitId::new("a10"),
            UnitId::new("a2"),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(|u| u.as_str()).collect();
        assert_eq!(names, vec!["B", "a10", "a2", "b"]);
    }

    #[test]
    fn test_adjacency_key_is_symmetric() {
        let x = UnitId::new("S2");
        let y = UnitId::new("S1");
        assert_eq!(adjacency_key(&x, &y), "S1:S2");
        assert_eq!(adjacency_key(&y, &x), "S1:S2");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = FormationId::new("brig-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"brig-1\"");
        assert_eq!(id.to_string(), "brig-1");
    }
}
