//! Validation Engine
//!
//! Gates every name, alias and hierarchy change to the tag catalog:
//! - names: shared name/alias namespace uniqueness
//! - hierarchy: cycle and double-path detection over ancestor/descendant closures
//! - merge: edge-set union for consolidating duplicate tags
//!
//! The engine never writes. It reads through the injected [`TagReader`] and
//! either accepts or rejects; callers persist what was accepted.

mod hierarchy;
mod merge;
mod names;

use crate::config::EngineConfig;
use crate::repository::TagReader;

/// Validator bound to one catalog view
///
/// Run each call inside the caller's transaction so all closure reads see
/// the same catalog.
pub struct TagValidator<'a, R: TagReader + ?Sized> {
    repo: &'a R,
    config: EngineConfig,
}

impl<'a, R: TagReader + ?Sized> TagValidator<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self::with_config(repo, EngineConfig::default())
    }

    pub fn with_config(repo: &'a R, config: EngineConfig) -> Self {
        Self { repo, config }
    }
}
