//! Catalog lookups for the validation engine

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainResult, Tag};
use super::super::db::not_initialized;
use super::super::traits::TagReader;
use super::tag_hierarchy::{closure, direct_children, direct_parents, CHILD_IDS_SQL, PARENT_IDS_SQL};
use super::tag_repo::{find_tag, query_tags};

#[async_trait]
impl TagReader for super::tag_repo::TagRepository {
    async fn find(&self, id: u32) -> DomainResult<Option<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        find_tag(conn, id)
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let tags = query_tags(conn, "SELECT t.id, t.name FROM tags t WHERE t.name = ?1", params![name])?;
        Ok(tags.into_iter().next())
    }

    async fn find_by_alias(&self, name: &str) -> DomainResult<Option<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        let tags = query_tags(
            conn,
            "SELECT t.id, t.name FROM tags t
             JOIN tag_aliases a ON t.id = a.tag_id
             WHERE a.alias = ?1",
            params![name],
        )?;
        Ok(tags.into_iter().next())
    }

    async fn find_direct_parents(&self, id: u32) -> DomainResult<Vec<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        direct_parents(conn, id)
    }

    async fn find_direct_children(&self, id: u32) -> DomainResult<Vec<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        direct_children(conn, id)
    }

    async fn find_all_ancestors(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        closure(conn, id, exclude_ids, PARENT_IDS_SQL)
    }

    async fn find_all_descendants(&self, id: u32, exclude_ids: &[u32]) -> DomainResult<Vec<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        closure(conn, id, exclude_ids, CHILD_IDS_SQL)
    }
}
