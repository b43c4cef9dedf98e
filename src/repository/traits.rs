//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult, Tag};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Read access to the tag catalog, as needed by the validation engine
///
/// Closures include the starting tag itself and are returned in discovery
/// order. A tag listed in `exclude_ids` is never returned and never traversed
/// through.
#[async_trait]
pub trait TagReader: Send + Sync {
    async fn find(&self, id: u32) -> DomainResult<Option<Tag>>;

    /// Tag whose name is exactly `name`
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>>;

    /// Tag that carries `name` among its aliases
    async fn find_by_alias(&self, name: &str) -> DomainResult<Option<Tag>>;

    async fn find_direct_parents(&self, id: u32) -> DomainResult<Vec<Tag>>;

    async fn find_direct_children(&self, id: u32) -> DomainResult<Vec<Tag>>;

    async fn find_all_ancestors(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>>;

    async fn find_all_descendants(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>>;
}

/// Write access to tag-tag edges
///
/// These never validate; run the engine first.
#[async_trait]
pub trait TagHierarchyOperations: Send + Sync {
    /// Add a parent tag to a child tag
    async fn add_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()>;

    /// Remove a parent tag from a child tag
    async fn remove_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()>;

    /// Overwrite every direct edge of a tag
    async fn replace_hierarchy(&self, tag_id: u32, parent_ids: &[u32], child_ids: &[u32]) -> DomainResult<()>;
}
