//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod memory;
pub mod tag;

#[cfg(test)]
mod tests;

pub use traits::{Repository, TagHierarchyOperations, TagReader};
pub use db::{init_db, DbState, SharedConnection};
pub use memory::MemoryTagStore;
pub use tag::TagRepository;
