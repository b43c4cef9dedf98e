//! Hierarchy value types
//!
//! Direction of an edge, the conflict raised when a proposed edge set is
//! rejected, and the edge sets computed for a merge.

use serde::{Deserialize, Serialize};

/// Side of a tag an edge is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Parent,
    Child,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Parent => "parent",
            Direction::Child => "child",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag reachable twice while validating a proposed edge set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConflict {
    pub direction: Direction,
    /// Name of the tag found in two closures
    pub invalid_tag: String,
    /// Name of the edge endpoint being applied when the conflict was found
    pub applying_tag: String,
}

impl HierarchyConflict {
    pub fn new(direction: Direction, invalid_tag: impl Into<String>, applying_tag: impl Into<String>) -> Self {
        Self {
            direction,
            invalid_tag: invalid_tag.into(),
            applying_tag: applying_tag.into(),
        }
    }

    /// True when the applying tag itself is the one already linked
    pub fn is_direct(&self) -> bool {
        self.invalid_tag == self.applying_tag
    }
}

impl std::fmt::Display for HierarchyConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_direct() {
            write!(
                f,
                "Cannot apply tag \"{}\" as it already is a {}",
                self.invalid_tag, self.direction
            )
        } else {
            write!(
                f,
                "Cannot apply tag \"{}\" as it is linked to \"{}\" which already is a {}",
                self.applying_tag, self.invalid_tag, self.direction
            )
        }
    }
}

/// Edge sets the surviving tag of a merge should end up with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedHierarchy {
    pub parents: Vec<u32>,
    pub children: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_conflict_message() {
        let conflict = HierarchyConflict::new(Direction::Parent, "Genre", "Genre");
        assert!(conflict.is_direct());
        assert_eq!(conflict.to_string(), "Cannot apply tag \"Genre\" as it already is a parent");
    }

    #[test]
    fn test_linked_conflict_message() {
        let conflict = HierarchyConflict::new(Direction::Child, "Bebop", "Jazz");
        assert!(!conflict.is_direct());
        assert_eq!(
            conflict.to_string(),
            "Cannot apply tag \"Jazz\" as it is linked to \"Bebop\" which already is a child"
        );
    }

    #[test]
    fn test_direction_serialization() {
        assert_eq!(serde_json::to_string(&Direction::Parent).unwrap(), "\"parent\"");
        let parsed: Direction = serde_json::from_str("\"child\"").unwrap();
        assert_eq!(parsed, Direction::Child);
    }
}
