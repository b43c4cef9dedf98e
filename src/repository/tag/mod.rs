//! Tag Repository Module
//!
//! This module provides tag repository functionality split into specialized sub-modules:
//! - tag_repo: Core CRUD operations
//! - tag_hierarchy: Tag-Tag relationship operations (parent-child)
//! - tag_reader: Name/alias lookups and ancestor/descendant closures

mod tag_repo;
mod tag_hierarchy;
mod tag_reader;

pub use tag_repo::TagRepository;
