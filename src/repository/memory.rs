//! In-memory Tag Store
//!
//! Node table plus two adjacency maps (parent-of, child-of) and two lookup
//! indices (by name, by alias). All of them live behind one lock so the
//! indices never disagree with the stored records.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Tag};
use super::traits::{Repository, TagHierarchyOperations, TagReader};

#[derive(Debug, Default)]
struct Catalog {
    next_id: u32,
    tags: BTreeMap<u32, Tag>,
    names: HashMap<String, u32>,
    aliases: HashMap<String, u32>,
    /// child -> parents, in insertion order
    parents_of: HashMap<u32, Vec<u32>>,
    /// parent -> children, in insertion order
    children_of: HashMap<u32, Vec<u32>>,
}

impl Catalog {
    fn require(&self, id: u32) -> DomainResult<&Tag> {
        self.tags
            .get(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Tag {} not found", id)))
    }

    fn resolve(&self, ids: Option<&Vec<u32>>) -> Vec<Tag> {
        ids.map(|ids| ids.iter().filter_map(|id| self.tags.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    /// Breadth-first walk over `edges`, starting tag first
    fn closure(&self, start: u32, exclude_ids: &[u32], edges: &HashMap<u32, Vec<u32>>) -> Vec<Tag> {
        if exclude_ids.contains(&start) || !self.tags.contains_key(&start) {
            return Vec::new();
        }

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut result = Vec::new();

        while let Some(current) = queue.pop_front() {
            if let Some(tag) = self.tags.get(&current) {
                result.push(tag.clone());
            }
            for next in edges.get(&current).into_iter().flatten() {
                if !exclude_ids.contains(next) && visited.insert(*next) {
                    queue.push_back(*next);
                }
            }
        }

        result
    }

    /// Make sure `tag`'s name and aliases are free in the indices
    fn check_indexable(&self, tag: &Tag, own_id: u32) -> DomainResult<()> {
        if let Some(&owner) = self.names.get(&tag.name) {
            if owner != own_id {
                return Err(DomainError::InvalidInput(format!("name '{}' is already indexed", tag.name)));
            }
        }
        for alias in &tag.aliases {
            if let Some(&owner) = self.aliases.get(alias) {
                if owner != own_id {
                    return Err(DomainError::InvalidInput(format!("alias '{}' is already indexed", alias)));
                }
            }
        }
        Ok(())
    }

    fn index(&mut self, tag: &Tag) {
        self.names.insert(tag.name.clone(), tag.id);
        for alias in &tag.aliases {
            self.aliases.insert(alias.clone(), tag.id);
        }
    }

    fn unindex(&mut self, tag: &Tag) {
        self.names.remove(&tag.name);
        for alias in &tag.aliases {
            self.aliases.remove(alias);
        }
    }

    fn link(&mut self, parent_id: u32, child_id: u32) {
        let parents = self.parents_of.entry(child_id).or_default();
        if !parents.contains(&parent_id) {
            parents.push(parent_id);
        }
        let children = self.children_of.entry(parent_id).or_default();
        if !children.contains(&child_id) {
            children.push(child_id);
        }
    }

    fn unlink(&mut self, parent_id: u32, child_id: u32) {
        if let Some(parents) = self.parents_of.get_mut(&child_id) {
            parents.retain(|id| *id != parent_id);
        }
        if let Some(children) = self.children_of.get_mut(&parent_id) {
            children.retain(|id| *id != child_id);
        }
    }

    fn detach_all(&mut self, id: u32) {
        for parent_id in self.parents_of.remove(&id).unwrap_or_default() {
            if let Some(children) = self.children_of.get_mut(&parent_id) {
                children.retain(|c| *c != id);
            }
        }
        for child_id in self.children_of.remove(&id).unwrap_or_default() {
            if let Some(parents) = self.parents_of.get_mut(&child_id) {
                parents.retain(|p| *p != id);
            }
        }
    }
}

/// Tag catalog held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    catalog: Mutex<Catalog>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Tag> for MemoryTagStore {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        let mut catalog = self.catalog.lock().await;
        catalog.check_indexable(entity, 0)?;

        catalog.next_id += 1;
        let mut tag = entity.clone();
        tag.id = catalog.next_id;

        catalog.index(&tag);
        catalog.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.tags.get(&id).cloned())
    }

    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let mut catalog = self.catalog.lock().await;
        let previous = catalog.require(entity.id)?.clone();
        catalog.check_indexable(entity, entity.id)?;

        catalog.unindex(&previous);
        catalog.index(entity);
        catalog.tags.insert(entity.id, entity.clone());
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut catalog = self.catalog.lock().await;
        if let Some(tag) = catalog.tags.remove(&id) {
            catalog.unindex(&tag);
            catalog.detach_all(id);
        }
        Ok(())
    }
}

#[async_trait]
impl TagReader for MemoryTagStore {
    async fn find(&self, id: u32) -> DomainResult<Option<Tag>> {
        self.find_by_id(id).await
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.names.get(name).and_then(|id| catalog.tags.get(id)).cloned())
    }

    async fn find_by_alias(&self, name: &str) -> DomainResult<Option<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.aliases.get(name).and_then(|id| catalog.tags.get(id)).cloned())
    }

    async fn find_direct_parents(&self, id: u32) -> DomainResult<Vec<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.resolve(catalog.parents_of.get(&id)))
    }

    async fn find_direct_children(&self, id: u32) -> DomainResult<Vec<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.resolve(catalog.children_of.get(&id)))
    }

    async fn find_all_ancestors(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.closure(id, exclude_ids, &catalog.parents_of))
    }

    async fn find_all_descendants(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>> {
        let catalog = self.catalog.lock().await;
        Ok(catalog.closure(id, exclude_ids, &catalog.children_of))
    }
}

#[async_trait]
impl TagHierarchyOperations for MemoryTagStore {
    async fn add_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()> {
        let mut catalog = self.catalog.lock().await;
        catalog.require(child_tag_id)?;
        catalog.require(parent_tag_id)?;
        if child_tag_id == parent_tag_id {
            return Err(DomainError::InvalidInput(format!("Tag {} cannot be its own parent", child_tag_id)));
        }
        catalog.link(parent_tag_id, child_tag_id);
        Ok(())
    }

    async fn remove_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()> {
        let mut catalog = self.catalog.lock().await;
        catalog.unlink(parent_tag_id, child_tag_id);
        Ok(())
    }

    async fn replace_hierarchy(&self, tag_id: u32, parent_ids: &[u32], child_ids: &[u32]) -> DomainResult<()> {
        let mut catalog = self.catalog.lock().await;
        catalog.require(tag_id)?;
        for id in parent_ids.iter().chain(child_ids) {
            catalog.require(*id)?;
            if *id == tag_id {
                return Err(DomainError::InvalidInput(format!("Tag {} cannot link to itself", tag_id)));
            }
        }

        catalog.detach_all(tag_id);
        for parent_id in parent_ids {
            catalog.link(*parent_id, tag_id);
        }
        for child_id in child_ids {
            catalog.link(tag_id, *child_id);
        }
        Ok(())
    }
}
