//! Tag Hierarchy Engine
//!
//! Keeps a tag catalog consistent: shared name/alias namespace, acyclic
//! parent/child graph, and merging of duplicate tags.
//!
//! Layered architecture:
//! - domain: Core entities and errors
//! - repository: Data access abstractions and implementations (SQLite, in-memory)
//! - validation: The engine gating every name, alias and hierarchy change
//! - config: Engine settings
//!
//! Logging goes through the `log` facade; install a logger in the embedding
//! application to see it.

pub mod config;
pub mod domain;
pub mod repository;
pub mod validation;

pub use config::{DiamondPolicy, EngineConfig};
pub use domain::{Direction, DomainError, DomainResult, HierarchyConflict, MergedHierarchy, Tag};
pub use repository::{init_db, DbState, MemoryTagStore, Repository, TagHierarchyOperations, TagReader, TagRepository};
pub use validation::TagValidator;
