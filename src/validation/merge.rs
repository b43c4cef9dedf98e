//! Merge resolution
//!
//! Folding source tags into a destination keeps every relationship any
//! member of the merge group had with a tag outside the group. Links inside
//! the group collapse into the surviving tag and are dropped.

use crate::domain::{DomainResult, MergedHierarchy, Tag};
use crate::repository::TagReader;
use super::TagValidator;

/// Append ids of `tags` not yet present and not part of the merge group
fn accumulate(into: &mut Vec<u32>, tags: &[Tag], group: &[u32]) {
    for tag in tags {
        if into.contains(&tag.id) || group.contains(&tag.id) {
            continue;
        }
        into.push(tag.id);
    }
}

impl<R: TagReader + ?Sized> TagValidator<'_, R> {
    /// Union of the direct edges of the destination and every source,
    /// without validating the result
    pub async fn collect_merged_edges(&self, destination_id: u32, source_ids: &[u32]) -> DomainResult<MergedHierarchy> {
        let group: Vec<u32> = std::iter::once(destination_id)
            .chain(source_ids.iter().copied())
            .collect();

        let mut merged = MergedHierarchy::default();
        for &id in &group {
            let parents = self.repo.find_direct_parents(id).await?;
            accumulate(&mut merged.parents, &parents, &group);

            let children = self.repo.find_direct_children(id).await?;
            accumulate(&mut merged.children, &children, &group);
        }

        log::debug!(
            "merge of {:?} into tag {} collects parents {:?}, children {:?}",
            source_ids, destination_id, merged.parents, merged.children
        );
        Ok(merged)
    }

    /// Edge sets the destination should carry once `source_ids` are folded
    /// into it
    ///
    /// Nothing is returned unless the merged edges pass
    /// [`ensure_valid_hierarchy`](Self::ensure_valid_hierarchy). Persisting
    /// them and deleting the sources is up to the caller.
    pub async fn merge_hierarchy(&self, destination_id: u32, source_ids: &[u32]) -> DomainResult<MergedHierarchy> {
        let merged = self.collect_merged_edges(destination_id, source_ids).await?;
        self.ensure_valid_hierarchy(destination_id, Some(&merged.parents), Some(&merged.children))
            .await?;
        Ok(merged)
    }
}
