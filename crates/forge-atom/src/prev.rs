use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// An atom's predecessor reference.
///
/// The genesis atom of a chain carries the literal string `"genesis"`;
/// every other atom carries an ordered, non-empty sequence of predecessor
/// `proof` hashes. The sequence shape is DAG-ready — a future extension may
/// let an atom acknowledge multiple converging predecessors — even though
/// today's sealing and verification paths assume a single linear parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prev {
    Genesis,
    Parents(Vec<String>),
}

impl Prev {
    /// Wrap a single predecessor proof hash, the linear-chain common case.
    pub fn single(proof: impl Into<String>) -> Self {
        Prev::Parents(vec![proof.into()])
    }

    /// `true` for the distinguished genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, Prev::Genesis)
    }

    /// The predecessor hashes, empty for genesis.
    pub fn parents(&self) -> &[String] {
        match self {
            Prev::Genesis => &[],
            Prev::Parents(v) => v,
        }
    }

    /// `true` if `proof` is named among this atom's predecessors.
    pub fn contains(&self, proof: &str) -> bool {
        self.parents().iter().any(|p| p == proof)
    }
}

impl Serialize for Prev {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Prev::Genesis => serializer.serialize_str("genesis"),
            Prev::Parents(parents) => parents.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Prev {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Scalar(String),
            Seq(Vec<String>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Scalar(s) if s == "genesis" => Ok(Prev::Genesis),
            Raw::Scalar(s) => Ok(Prev::Parents(vec![s])),
            Raw::Seq(v) => Ok(Prev::Parents(v)),
        }
    }
}

impl From<&str> for Prev {
    fn from(s: &str) -> Self {
        if s == "genesis" {
            Prev::Genesis
        } else {
            Prev::single(s)
        }
    }
}

impl From<String> for Prev {
    fn from(s: String) -> Self {
        Prev::from(s.as_str())
    }
}

impl From<Vec<String>> for Prev {
    fn from(v: Vec<String>) -> Self {
        Prev::Parents(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_round_trips_through_json() {
        let p = Prev::Genesis;
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"genesis\"");
        let back: Prev = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Prev::Genesis);
    }

    #[test]
    fn single_parent_serialises_as_array() {
        let p = Prev::single("abc");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[\"abc\"]");
        let back: Prev = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn contains_checks_membership_not_equality() {
        let p = Prev::Parents(vec!["a".into(), "b".into()]);
        assert!(p.contains("a"));
        assert!(p.contains("b"));
        assert!(!p.contains("c"));
    }
}
