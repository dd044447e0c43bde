//! Hierarchical line addresses
//!
//! An address is a path of 1-based positions: `3` is the third top-level
//! line, `3.2` the second line inside the subproof numbered `3`. The dotted
//! form only appears at the serialization boundary.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(Vec<u32>);

impl StepId {
    pub fn top(n: u32) -> Self {
        StepId(vec![n])
    }

    pub fn from_path(path: Vec<u32>) -> Option<Self> {
        if path.is_empty() || path.contains(&0) {
            None
        } else {
            Some(StepId(path))
        }
    }

    /// Address of the `n`th line inside this one
    pub fn child(&self, n: u32) -> Self {
        let mut path = self.0.clone();
        path.push(n);
        StepId(path)
    }

    /// True if `other` is this address or lies inside it
    pub fn contains(&self, other: &StepId) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Document order: an enclosing subproof comes before its contents.
    pub fn is_before(&self, other: &StepId) -> bool {
        for (x, y) in self.0.iter().zip(&other.0) {
            if x != y {
                return x < y;
            }
        }
        self.0.len() < other.0.len()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid line address '{0}'")]
pub struct InvalidStepId(pub String);

impl FromStr for StepId {
    type Err = InvalidStepId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| InvalidStepId(s.to_string()))?;
        StepId::from_path(path).ok_or_else(|| InvalidStepId(s.to_string()))
    }
}

impl Serialize for StepId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StepId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StepId {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(StepId::top(3).child(2).child(1).to_string(), "3.2.1");
        assert_eq!(id("3.2.1"), StepId::top(3).child(2).child(1));
        assert_eq!(id(" 4 "), StepId::top(4));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("".parse::<StepId>().is_err());
        assert!("1..2".parse::<StepId>().is_err());
        assert!("0".parse::<StepId>().is_err());
        assert!("a".parse::<StepId>().is_err());
        assert!("-1".parse::<StepId>().is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(id("1").is_before(&id("2")));
        assert!(id("3").is_before(&id("3.1")));
        assert!(id("3.2").is_before(&id("3.10")));
        assert!(id("3.4").is_before(&id("4")));
        assert!(!id("4").is_before(&id("3.4")));
        assert!(!id("2").is_before(&id("2")));
    }

    #[test]
    fn test_contains() {
        assert!(id("3").contains(&id("3.2.1")));
        assert!(id("3").contains(&id("3")));
        assert!(!id("3.2").contains(&id("3")));
        assert!(!id("3").contains(&id("30.1")));
    }

    #[test]
    fn test_serializes_as_dotted_string() {
        let json = serde_json::to_string(&id("2.3")).unwrap();
        assert_eq!(json, "\"2.3\"");
        let back: StepId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id("2.3"));
    }
}
