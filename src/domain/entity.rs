//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

use super::hierarchy::HierarchyConflict;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// The first three variants are raised by the validation engine; the rest are
/// storage failures passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// Candidate name equals the name of a different tag
    NameExists { name: String },
    /// Candidate name equals an alias of a different tag
    NameUsedByAlias { name: String, other_tag: String },
    /// Proposed edges would create a cycle or a duplicate path
    InvalidHierarchy(HierarchyConflict),
    NotFound(String),
    InvalidInput(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NameExists { name } => {
                write!(f, "tag with name '{}' already exists", name)
            }
            DomainError::NameUsedByAlias { name, other_tag } => {
                write!(f, "name '{}' is used as alias for '{}'", name, other_tag)
            }
            DomainError::InvalidHierarchy(conflict) => write!(f, "{}", conflict),
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<HierarchyConflict> for DomainError {
    fn from(conflict: HierarchyConflict) -> Self {
        DomainError::InvalidHierarchy(conflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    #[test]
    fn test_name_error_messages() {
        let exists = DomainError::NameExists { name: "Rock".to_string() };
        assert_eq!(exists.to_string(), "tag with name 'Rock' already exists");

        let alias = DomainError::NameUsedByAlias {
            name: "Rock".to_string(),
            other_tag: "Rock Music".to_string(),
        };
        assert_eq!(alias.to_string(), "name 'Rock' is used as alias for 'Rock Music'");
    }

    #[test]
    fn test_conflict_converts_into_error() {
        let conflict = HierarchyConflict::new(Direction::Child, "Jazz", "Music");
        let err: DomainError = conflict.clone().into();
        assert_eq!(err, DomainError::InvalidHierarchy(conflict));
    }
}
