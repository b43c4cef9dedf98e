//! Tag Entity
//!
//! A named catalog entry. Names and aliases share one namespace across the
//! whole catalog; hierarchy edges are stored separately by the repository.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A tag in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Unique identifier (0 until the repository assigns one)
    pub id: u32,
    /// Tag name
    pub name: String,
    /// Alternate names
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl Tag {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            aliases: BTreeSet::new(),
        }
    }

    pub fn with_aliases<I, S>(id: u32, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }
}

impl Entity for Tag {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
