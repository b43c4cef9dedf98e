//! Name and alias uniqueness
//!
//! Names and aliases share one namespace. Matching is whatever the
//! repository lookups do; nothing is normalized here.

use crate::domain::{DomainError, DomainResult};
use crate::repository::TagReader;
use super::TagValidator;

impl<R: TagReader + ?Sized> TagValidator<'_, R> {
    /// Fails if `name` is the name or an alias of a tag other than `id`
    ///
    /// Pass `id = 0` for a tag that does not exist yet.
    pub async fn ensure_name_unique(&self, id: u32, name: &str) -> DomainResult<()> {
        if let Some(existing) = self.repo.find_by_name(name).await? {
            if existing.id != id {
                log::warn!("name '{}' already taken by tag {}", name, existing.id);
                return Err(DomainError::NameExists { name: name.to_string() });
            }
        }

        if let Some(owner) = self.repo.find_by_alias(name).await? {
            if owner.id != id {
                log::warn!("name '{}' is an alias of tag {}", name, owner.id);
                return Err(DomainError::NameUsedByAlias {
                    name: name.to_string(),
                    other_tag: owner.name,
                });
            }
        }

        Ok(())
    }

    /// Checks each alias in order, stopping at the first collision
    pub async fn ensure_aliases_unique<S>(&self, id: u32, aliases: &[S]) -> DomainResult<()>
    where
        S: AsRef<str> + Sync,
    {
        for alias in aliases {
            self.ensure_name_unique(id, alias.as_ref()).await?;
        }
        Ok(())
    }
}
