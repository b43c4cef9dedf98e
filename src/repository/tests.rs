//! Repository Integration Tests
//!
//! Tests for TagRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{Direction, DomainError, HierarchyConflict, Tag};
    use crate::repository::{init_db, Repository, TagHierarchyOperations, TagReader, TagRepository};
    use crate::validation::TagValidator;
    use std::path::PathBuf;

    async fn setup_test_db() -> TagRepository {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        TagRepository::new(db_state.conn.clone())
    }

    async fn create(repo: &TagRepository, name: &str) -> u32 {
        repo.create(&Tag::new(0, name)).await.expect("Failed to create").id
    }

    fn ids(tags: &[Tag]) -> Vec<u32> {
        tags.iter().map(|t| t.id).collect()
    }

    #[tokio::test]
    async fn test_create_and_find_with_aliases() {
        let repo = setup_test_db().await;

        let tag = Tag::with_aliases(0, "Rock", ["Rock Music", "Rock'n'Roll"]);
        let created = repo.create(&tag).await.expect("Failed to create");
        assert!(created.id > 0);

        let found = repo.find_by_id(created.id).await.expect("Find failed").unwrap();
        assert_eq!(found, created);

        let by_alias = repo.find_by_alias("Rock'n'Roll").await.unwrap().unwrap();
        assert_eq!(by_alias.id, created.id);
        assert!(repo.find_by_name("Rock Music").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_aliases() {
        let repo = setup_test_db().await;
        let mut tag = repo.create(&Tag::with_aliases(0, "Jazz", ["Swing"])).await.unwrap();

        tag.name = "Jazz Music".to_string();
        tag.aliases.clear();
        tag.aliases.insert("Bop".to_string());
        repo.update(&tag).await.expect("Update failed");

        let found = repo.find(tag.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Jazz Music");
        assert!(repo.find_by_alias("Swing").await.unwrap().is_none());
        assert_eq!(repo.find_by_alias("Bop").await.unwrap().unwrap().id, tag.id);
    }

    #[tokio::test]
    async fn test_update_missing_tag() {
        let repo = setup_test_db().await;
        let result = repo.update(&Tag::new(42, "Ghost")).await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_id_beyond_u32() {
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        {
            let guard = db_state.conn.lock().await;
            let conn = guard.as_ref().unwrap();
            conn.execute("INSERT INTO tags (id, name) VALUES (?1, 'Last')", [i64::from(u32::MAX)])
                .unwrap();
        }
        let repo = TagRepository::new(db_state.conn.clone());

        let result = repo.create(&Tag::with_aliases(0, "Overflow", ["Spill"])).await;
        assert!(matches!(result, Err(DomainError::Internal(_))));
        // the transaction rolled back
        assert!(repo.find_by_name("Overflow").await.unwrap().is_none());
        assert!(repo.find_by_alias("Spill").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.db");

        let first = init_db(&path).await.unwrap();
        let repo = TagRepository::new(first.conn.clone());
        let folk = create(&repo, "Folk").await;
        drop(repo);
        drop(first);

        let second = init_db(&path).await.unwrap();
        let repo = TagRepository::new(second.conn.clone());
        let found = repo.find(folk).await.unwrap().unwrap();
        assert_eq!(found.name, "Folk");
        repo.update(&found).await.expect("updated_at present after reopening");
    }

    #[tokio::test]
    async fn test_delete_cascades_edges_and_aliases() {
        let repo = setup_test_db().await;
        let a = create(&repo, "A").await;
        let b = repo.create(&Tag::with_aliases(0, "B", ["Bee"])).await.unwrap().id;
        let c = create(&repo, "C").await;
        repo.add_parent_tag(b, a).await.unwrap();
        repo.add_parent_tag(c, b).await.unwrap();

        repo.delete(b).await.expect("Delete failed");

        assert!(repo.find_by_id(b).await.unwrap().is_none());
        assert!(repo.find_by_alias("Bee").await.unwrap().is_none());
        assert!(repo.find_direct_children(a).await.unwrap().is_empty());
        assert!(repo.find_direct_parents(c).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closures_with_exclusion() {
        let repo = setup_test_db().await;
        let a = create(&repo, "A").await;
        let b = create(&repo, "B").await;
        let c = create(&repo, "C").await;
        let d = create(&repo, "D").await;
        repo.add_parent_tag(b, a).await.unwrap();
        repo.add_parent_tag(c, b).await.unwrap();
        repo.add_parent_tag(d, b).await.unwrap();

        assert_eq!(ids(&repo.find_all_ancestors(c, &[]).await.unwrap()), vec![c, b, a]);
        assert_eq!(ids(&repo.find_all_descendants(a, &[]).await.unwrap()), vec![a, b, c, d]);
        assert_eq!(ids(&repo.find_all_descendants(a, &[b]).await.unwrap()), vec![a]);
        assert!(repo.find_all_ancestors(c, &[c]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_self_parent_rejected() {
        let repo = setup_test_db().await;
        let a = create(&repo, "A").await;
        let result = repo.add_parent_tag(a, a).await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_remove_parent() {
        let repo = setup_test_db().await;
        let a = create(&repo, "A").await;
        let b = create(&repo, "B").await;
        repo.add_parent_tag(b, a).await.unwrap();
        assert_eq!(ids(&repo.find_direct_parents(b).await.unwrap()), vec![a]);

        repo.remove_parent_tag(b, a).await.unwrap();
        assert!(repo.find_direct_parents(b).await.unwrap().is_empty());
        assert!(repo.find_direct_children(a).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_rejected_on_sqlite() {
        let repo = setup_test_db().await;
        let p = create(&repo, "P").await;
        let q = create(&repo, "Q").await;
        repo.add_parent_tag(q, p).await.unwrap();

        let validator = TagValidator::new(&repo);
        let err = validator.ensure_valid_hierarchy(p, Some(&[q]), None).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidHierarchy(HierarchyConflict::new(Direction::Parent, "Q", "Q"))
        );
    }

    #[tokio::test]
    async fn test_validated_edges_round_trip() {
        let repo = setup_test_db().await;
        let music = create(&repo, "Music").await;
        let jazz = create(&repo, "Jazz").await;
        let bebop = create(&repo, "Bebop").await;

        let validator = TagValidator::new(&repo);
        validator.ensure_valid_hierarchy(jazz, Some(&[music]), Some(&[bebop])).await.unwrap();
        repo.replace_hierarchy(jazz, &[music], &[bebop]).await.unwrap();

        assert_eq!(ids(&repo.find_direct_parents(jazz).await.unwrap()), vec![music]);
        assert_eq!(ids(&repo.find_direct_children(jazz).await.unwrap()), vec![bebop]);
        validator.ensure_valid_hierarchy(jazz, None, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_merge_then_persist() {
        let repo = setup_test_db().await;
        let music = create(&repo, "Music").await;
        let rock = create(&repo, "Rock").await;
        let rock_music = repo.create(&Tag::with_aliases(0, "Rock Music", ["Rawk"])).await.unwrap().id;
        let punk = create(&repo, "Punk").await;
        repo.add_parent_tag(rock, music).await.unwrap();
        repo.add_parent_tag(rock_music, music).await.unwrap();
        repo.add_parent_tag(punk, rock_music).await.unwrap();

        let validator = TagValidator::new(&repo);
        let merged = validator.merge_hierarchy(rock, &[rock_music]).await.unwrap();
        assert_eq!(merged.parents, vec![music]);
        assert_eq!(merged.children, vec![punk]);

        repo.replace_hierarchy(rock, &merged.parents, &merged.children).await.unwrap();
        repo.delete(rock_music).await.unwrap();

        // the retired tag's alias is free again
        validator.ensure_name_unique(rock, "Rawk").await.unwrap();
        assert_eq!(ids(&repo.find_direct_parents(punk).await.unwrap()), vec![rock]);
        validator.ensure_valid_hierarchy(rock, None, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_uninitialized_state() {
        let state = crate::repository::DbState::new();
        assert!(!state.is_initialized().await);

        let repo = TagRepository::new(state.conn.clone());
        let result = repo.find(1).await;
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
