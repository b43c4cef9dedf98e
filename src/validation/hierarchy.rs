//! Hierarchy cycle validation
//!
//! A proposed edge set is checked by walking the ancestor closure of every
//! proposed parent and the descendant closure of every proposed child, with
//! the validated tag excluded from both walks. A tag met twice on the same
//! side is a double path; a tag met on both sides is a cycle through the
//! validated tag.

use std::collections::HashMap;

use crate::domain::{Direction, DomainError, DomainResult, HierarchyConflict, Tag};
use crate::repository::TagReader;
use super::TagValidator;

fn ids_of(tags: Vec<Tag>) -> Vec<u32> {
    tags.into_iter().map(|tag| tag.id).collect()
}

impl<R: TagReader + ?Sized> TagValidator<'_, R> {
    /// Validate the complete direct edge set proposed for tag `id`
    ///
    /// `None` for either side means "keep the current edges", which are then
    /// loaded from the repository and validated as if proposed.
    pub async fn ensure_valid_hierarchy(
        &self,
        id: u32,
        parent_ids: Option<&[u32]>,
        child_ids: Option<&[u32]>,
    ) -> DomainResult<()> {
        let parent_ids = match parent_ids {
            Some(ids) => ids.to_vec(),
            None => ids_of(self.repo.find_direct_parents(id).await?),
        };
        let child_ids = match child_ids {
            Some(ids) => ids.to_vec(),
            None => ids_of(self.repo.find_direct_children(id).await?),
        };
        log::debug!(
            "validating hierarchy of tag {} ({} diamonds): parents {:?}, children {:?}",
            id, self.config.diamond_policy, parent_ids, child_ids
        );

        self.reject_self_edge(id, &parent_ids, &child_ids).await?;

        let exclude_ids = [id];
        let strict = self.config.rejects_diamonds();

        let mut ancestors: HashMap<u32, Tag> = HashMap::new();
        for &parent_id in &parent_ids {
            for ancestor in self.repo.find_all_ancestors(parent_id, &exclude_ids).await? {
                if strict && ancestors.contains_key(&ancestor.id) {
                    return Err(self.conflict(Direction::Parent, &ancestor, parent_id).await);
                }
                ancestors.insert(ancestor.id, ancestor);
            }
        }

        let mut descendants: HashMap<u32, Tag> = HashMap::new();
        for &child_id in &child_ids {
            for descendant in self.repo.find_all_descendants(child_id, &exclude_ids).await? {
                if strict && descendants.contains_key(&descendant.id) {
                    return Err(self.conflict(Direction::Child, &descendant, child_id).await);
                }
                if ancestors.contains_key(&descendant.id) {
                    return Err(self.conflict(Direction::Parent, &descendant, child_id).await);
                }
                descendants.insert(descendant.id, descendant);
            }
        }

        Ok(())
    }

    /// The exclusion set hides a tag listed as its own parent or child, so
    /// that case is checked up front.
    async fn reject_self_edge(&self, id: u32, parent_ids: &[u32], child_ids: &[u32]) -> DomainResult<()> {
        let direction = if parent_ids.contains(&id) {
            Direction::Parent
        } else if child_ids.contains(&id) {
            Direction::Child
        } else {
            return Ok(());
        };

        let tag = self
            .repo
            .find(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Tag {} not found", id)))?;
        Err(self.conflict(direction, &tag, id).await)
    }

    /// Build the conflict error, naming the edge endpoint being applied
    async fn conflict(&self, direction: Direction, invalid: &Tag, applying_id: u32) -> DomainError {
        let applying = match self.repo.find(applying_id).await {
            Ok(Some(tag)) => tag,
            Ok(None) => return DomainError::NotFound(format!("Tag {} not found", applying_id)),
            Err(e) => return e,
        };

        let conflict = HierarchyConflict::new(direction, invalid.name.clone(), applying.name);
        log::warn!("rejected hierarchy change: {}", conflict);
        DomainError::InvalidHierarchy(conflict)
    }
}
