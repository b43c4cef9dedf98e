//! Tag Repository - Core CRUD Operations
//!
//! SQLite-backed implementation for Tag CRUD operations.
//! Specialized operations are in separate modules:
//! - tag_hierarchy: Tag-Tag relationships (parent-child)
//! - tag_reader: Lookups and closures used by the validation engine

use async_trait::async_trait;
use rusqlite::{params, Connection, Params};

use crate::domain::{DomainError, DomainResult, Tag};
use super::super::db::{db_err, not_initialized, SharedConnection};
use super::super::traits::Repository;

/// SQLite implementation of Tag repository
pub struct TagRepository {
    pub(super) conn: SharedConnection,
}

impl TagRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Tag> for TagRepository {
    async fn create(&self, entity: &Tag) -> DomainResult<Tag> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction().map_err(db_err)?;

        let now = chrono::Utc::now().timestamp_millis();
        tx.execute(
            "INSERT INTO tags (name, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![entity.name, now],
        )
        .map_err(db_err)?;

        let mut tag = entity.clone();
        let rowid = tx.last_insert_rowid();
        tag.id = u32::try_from(rowid)
            .map_err(|_| DomainError::Internal(format!("Tag id {} out of range", rowid)))?;
        write_aliases(&tx, &tag)?;

        tx.commit().map_err(db_err)?;
        Ok(tag)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Tag>> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;
        find_tag(conn, id)
    }

    async fn update(&self, entity: &Tag) -> DomainResult<Tag> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or_else(not_initialized)?;
        let tx = conn.transaction().map_err(db_err)?;

        let changed = tx
            .execute(
                "UPDATE tags SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![entity.name, chrono::Utc::now().timestamp_millis(), entity.id],
            )
            .map_err(db_err)?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Tag {} not found", entity.id)));
        }
        write_aliases(&tx, entity)?;

        tx.commit().map_err(db_err)?;
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard.as_ref().ok_or_else(not_initialized)?;

        // aliases and relations cascade
        conn.execute("DELETE FROM tags WHERE id = ?1", params![id])
            .map_err(db_err)?;

        Ok(())
    }
}

/// Convert a database row (id, name) to Tag without aliases
fn row_to_tag(row: &rusqlite::Row) -> DomainResult<Tag> {
    let id: u32 = row.get(0).map_err(db_err)?;
    let name: String = row.get(1).map_err(db_err)?;
    Ok(Tag::new(id, name))
}

fn load_aliases(conn: &Connection, tag: &mut Tag) -> DomainResult<()> {
    let mut stmt = conn
        .prepare("SELECT alias FROM tag_aliases WHERE tag_id = ?1")
        .map_err(db_err)?;
    let aliases = stmt
        .query_map(params![tag.id], |row| row.get::<_, String>(0))
        .map_err(db_err)?;
    for alias in aliases {
        tag.aliases.insert(alias.map_err(db_err)?);
    }
    Ok(())
}

/// Replace the stored aliases of `tag` with its current set
fn write_aliases(conn: &Connection, tag: &Tag) -> DomainResult<()> {
    conn.execute("DELETE FROM tag_aliases WHERE tag_id = ?1", params![tag.id])
        .map_err(db_err)?;
    for alias in &tag.aliases {
        conn.execute(
            "INSERT INTO tag_aliases (tag_id, alias) VALUES (?1, ?2)",
            params![tag.id, alias],
        )
        .map_err(db_err)?;
    }
    Ok(())
}

/// Run a query selecting (id, name) and hydrate the aliases of each row
pub(super) fn query_tags<P: Params>(conn: &Connection, sql: &str, params: P) -> DomainResult<Vec<Tag>> {
    let mut stmt = conn.prepare(sql).map_err(db_err)?;
    let mut rows = stmt.query(params).map_err(db_err)?;

    let mut tags = Vec::new();
    while let Some(row) = rows.next().map_err(db_err)? {
        tags.push(row_to_tag(row)?);
    }
    for tag in &mut tags {
        load_aliases(conn, tag)?;
    }
    Ok(tags)
}

pub(super) fn find_tag(conn: &Connection, id: u32) -> DomainResult<Option<Tag>> {
    let tags = query_tags(conn, "SELECT t.id, t.name FROM tags t WHERE t.id = ?1", params![id])?;
    Ok(tags.into_iter().next())
}
