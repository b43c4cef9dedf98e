//! Tag Hierarchy Operations
//!
//! Operations for managing parent-child relationships between tags (tag_relations table).

use std::collections::{HashSet, VecDeque};

use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::domain::{DomainError, DomainResult, Tag};
use super::super::db::{db_err, not_initialized};
use super::super::traits::TagHierarchyOperations;
use super::tag_repo::{find_tag, query_tags};

/// Next hop when walking up the hierarchy
pub(super) const PARENT_IDS_SQL: &str =
    "SELECT parent_id FROM tag_relations WHERE child_id = ?1 ORDER BY rowid";

/// Next hop when walking down the hierarchy
pub(super) const CHILD_IDS_SQL: &str =
    "SELECT child_id FROM tag_relations WHERE parent_id = ?1 ORDER BY rowid";

pub(super) fn direct_parents(conn: &Connection, id: u32) -> DomainResult<Vec<Tag>> {
    query_tags(
        conn,
        "SELECT t.id, t.name FROM tags t
         JOIN tag_relations r ON t.id = r.parent_id
         WHERE r.child_id = ?1
         ORDER BY r.rowid",
        params![id],
    )
}

pub(super) fn direct_children(conn: &Connection, id: u32) -> DomainResult<Vec<Tag>> {
    query_tags(
        conn,
        "SELECT t.id, t.name FROM tags t
         JOIN tag_relations r ON t.id = r.child_id
         WHERE r.parent_id = ?1
         ORDER BY r.rowid",
        params![id],
    )
}

/// Breadth-first closure from `start`, starting tag first
///
/// `next_sql` selects the neighbour ids of `?1`. Ids in `exclude_ids` are
/// neither returned nor expanded.
pub(super) fn closure(conn: &Connection, start: u32, exclude_ids: &[u32], next_sql: &str) -> DomainResult<Vec<Tag>> {
    if exclude_ids.contains(&start) {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(next_sql).map_err(db_err)?;
    let mut visited = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let next_ids = stmt
            .query_map(params![current], |row| row.get::<_, u32>(0))
            .map_err(db_err)?;
        for next in next_ids {
            let next = next.map_err(db_err)?;
            if !exclude_ids.contains(&next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let mut tags = Vec::with_capacity(order.len());
    for id in order {
        if let Some(tag) = find_tag(conn, id)? {
            tags.push(tag);
        }
    }
    Ok(tags)
}

fn require_tag(conn: &Connection, id: u32) -> DomainResult<()> {
    match find_tag(conn, id)? {
        Some(_) => Ok(()),
        None => Err(DomainError::NotFound(format!("Tag {} not found", id))),
    }
}

#[async_trait]
impl TagHierarchyOperations for super::tag_repo::TagRepository {
    async fn add_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        require_tag(conn, child_tag_id)?;
        require_tag(conn, parent_tag_id)?;
        if child_tag_id == parent_tag_id {
            return Err(DomainError::InvalidInput(format!("Tag {} cannot be its own parent", child_tag_id)));
        }

        conn.execute(
            "INSERT OR IGNORE INTO tag_relations (parent_id, child_id) VALUES (?1, ?2)",
            params![parent_tag_id, child_tag_id],
        )
        .map_err(db_err)?;

        Ok(())
    }

    async fn remove_parent_tag(&self, child_tag_id: u32, parent_tag_id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        conn.execute(
            "DELETE FROM tag_relations WHERE parent_id = ?1 AND child_id = ?2",
            params![parent_tag_id, child_tag_id],
        )
        .map_err(db_err)?;

        Ok(())
    }

    async fn replace_hierarchy(&self, tag_id: u32, parent_ids: &[u32], child_ids: &[u32]) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction().map_err(db_err)?;

        require_tag(&tx, tag_id)?;
        for id in parent_ids.iter().chain(child_ids) {
            require_tag(&tx, *id)?;
            if *id == tag_id {
                return Err(DomainError::InvalidInput(format!("Tag {} cannot link to itself", tag_id)));
            }
        }

        tx.execute(
            "DELETE FROM tag_relations WHERE parent_id = ?1 OR child_id = ?1",
            params![tag_id],
        )
        .map_err(db_err)?;
        for parent_id in parent_ids {
            tx.execute(
                "INSERT OR IGNORE INTO tag_relations (parent_id, child_id) VALUES (?1, ?2)",
                params![parent_id, tag_id],
            )
            .map_err(db_err)?;
        }
        for child_id in child_ids {
            tx.execute(
                "INSERT OR IGNORE INTO tag_relations (parent_id, child_id) VALUES (?1, ?2)",
                params![tag_id, child_id],
            )
            .map_err(db_err)?;
        }

        tx.commit().map_err(db_err)?;
        Ok(())
    }
}
