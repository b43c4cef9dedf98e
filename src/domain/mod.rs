//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod hierarchy;
mod tag;

pub use entity::{Entity, DomainError, DomainResult};
pub use hierarchy::{Direction, HierarchyConflict, MergedHierarchy};
pub use tag::Tag;
