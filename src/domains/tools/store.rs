//! The tool record store.
//!
//! Owner-scoped CRUD and fuzzy search over tool records. Every query is
//! filtered by the owning user, so records belonging to other users are
//! indistinguishable from records that do not exist. Mutations run inside a
//! per-call transaction; an early return rolls back on drop.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use super::error::ToolError;
use super::model::{Tool, ToolDraft};
use super::search;
use crate::core::error::{Error, Result};

const SELECT_COLUMNS: &str = "SELECT id, name, quantity, description, image, owner_id FROM tools";

/// Record store for tools, backed by a shared connection pool.
#[derive(Clone)]
pub struct ToolStore {
    pool: SqlitePool,
}

impl ToolStore {
    /// Create a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch a single tool owned by `owner`.
    ///
    /// Fails with [`ToolError::NotFound`] if no such record is visible to
    /// the owner.
    pub async fn get_by_id(&self, owner: Uuid, tool_id: Uuid) -> Result<Tool> {
        let query = format!("{SELECT_COLUMNS} WHERE owner_id = ? AND id = ?");
        sqlx::query_as::<_, Tool>(&query)
            .bind(owner)
            .bind(tool_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ToolError::NotFound(tool_id).into())
    }

    /// List tools owned by `owner`, in insertion order.
    ///
    /// A non-empty `name` restricts the result to exact name matches. An
    /// empty or absent filter returns everything.
    pub async fn list(&self, owner: Uuid, name: Option<&str>) -> Result<Vec<Tool>> {
        let tools = match name.filter(|n| !n.is_empty()) {
            Some(name) => {
                let query =
                    format!("{SELECT_COLUMNS} WHERE owner_id = ? AND name = ? ORDER BY rowid");
                sqlx::query_as::<_, Tool>(&query)
                    .bind(owner)
                    .bind(name)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!("{SELECT_COLUMNS} WHERE owner_id = ? ORDER BY rowid");
                sqlx::query_as::<_, Tool>(&query)
                    .bind(owner)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(tools)
    }

    /// Fuzzy-search the owner's tools by name.
    ///
    /// This is a linear scan: every record the owner has is fetched and
    /// scored in memory. Fine for a personal inventory, not for large
    /// datasets.
    pub async fn search(&self, owner: Uuid, query: &str) -> Result<Vec<Tool>> {
        let tools = self.list(owner, None).await?;
        debug!(candidates = tools.len(), %query, "searching tools");
        Ok(search::rank_by_similarity(query, tools))
    }

    /// Create a tool from a draft.
    ///
    /// Assigns a fresh id, sets the owner server-side, and validates the
    /// field constraints before persisting. A uniqueness conflict reported
    /// by the store surfaces as [`ToolError::AlreadyExists`].
    pub async fn create(&self, owner: Uuid, draft: ToolDraft) -> Result<Tool> {
        let tool = draft.into_tool(owner);
        tool.validate()?;
        self.insert(&tool).await?;
        debug!(tool_id = %tool.id, "created tool");
        Ok(tool)
    }

    /// Persist an updated tool.
    ///
    /// The ownership check happens before any SQL runs: a record owned by a
    /// different user fails with [`ToolError::NotFound`] without touching
    /// the store. Constraints are re-validated because the caller may have
    /// patched the record in memory.
    pub async fn update(&self, owner: Uuid, tool: &Tool) -> Result<Tool> {
        if tool.owner_id != owner {
            return Err(ToolError::NotFound(tool.id).into());
        }
        tool.validate()?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE tools SET name = ?, quantity = ?, description = ?, image = ? \
             WHERE id = ? AND owner_id = ?",
        )
        .bind(&tool.name)
        .bind(tool.quantity)
        .bind(&tool.description)
        .bind(&tool.image)
        .bind(tool.id)
        .bind(tool.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| classify_conflict(err, tool.id))?;

        if result.rows_affected() == 0 {
            return Err(ToolError::NotFound(tool.id).into());
        }
        tx.commit().await?;
        Ok(tool.clone())
    }

    /// Delete a tool owned by `owner`.
    ///
    /// Uses the same lookup as [`ToolStore::get_by_id`], so a missing or
    /// foreign-owned record fails with [`ToolError::NotFound`]. Deletion is
    /// permanent.
    pub async fn delete(&self, owner: Uuid, tool_id: Uuid) -> Result<()> {
        let tool = self.get_by_id(owner, tool_id).await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tools WHERE id = ? AND owner_id = ?")
            .bind(tool.id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!(%tool_id, "deleted tool");
        Ok(())
    }

    async fn insert(&self, tool: &Tool) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO tools (id, name, quantity, description, image, owner_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(tool.id)
        .bind(&tool.name)
        .bind(tool.quantity)
        .bind(&tool.description)
        .bind(&tool.image)
        .bind(tool.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| classify_conflict(err, tool.id))?;
        tx.commit().await?;
        Ok(())
    }
}

/// Map a uniqueness violation onto the domain error; everything else
/// propagates untranslated.
fn classify_conflict(err: sqlx::Error, tool_id: Uuid) -> Error {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            ToolError::AlreadyExists(tool_id).into()
        }
        err => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::Database;
    use crate::domains::tools::model::ToolPatch;

    async fn store_with_owner() -> (ToolStore, Uuid) {
        let db = Database::in_memory().await.expect("in-memory database");
        let store = ToolStore::new(db.pool().clone());
        let owner = insert_user(&db).await;
        (store, owner)
    }

    async fn insert_user(db: &Database) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, is_active, created_at) \
             VALUES (?, ?, 'x', 1, datetime('now'))",
        )
        .bind(id)
        .bind(format!("{id}@example.com"))
        .execute(db.pool())
        .await
        .expect("insert user");
        id
    }

    fn draft(name: &str, quantity: i64) -> ToolDraft {
        ToolDraft {
            name: name.to_string(),
            quantity,
            description: String::new(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let (store, owner) = store_with_owner().await;
        let created = store.create(owner, draft("Hammer", 5)).await.unwrap();
        let fetched = store.get_by_id(owner, created.id).await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.description, "");
        assert_eq!(fetched.image, "");
    }

    #[tokio::test]
    async fn test_get_by_id_hides_foreign_records() {
        let db = Database::in_memory().await.unwrap();
        let store = ToolStore::new(db.pool().clone());
        let owner_a = insert_user(&db).await;
        let owner_b = insert_user(&db).await;

        let created = store.create(owner_a, draft("Hammer", 5)).await.unwrap();
        let err = store.get_by_id(owner_b, created.id).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_does_not_leak_across_owners() {
        let db = Database::in_memory().await.unwrap();
        let store = ToolStore::new(db.pool().clone());
        let owner_a = insert_user(&db).await;
        let owner_b = insert_user(&db).await;

        store.create(owner_a, draft("Hammer", 5)).await.unwrap();
        assert!(store.list(owner_b, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_filter_means_unfiltered() {
        let (store, owner) = store_with_owner().await;
        store.create(owner, draft("Hammer", 1)).await.unwrap();
        store.create(owner, draft("Wrench", 1)).await.unwrap();

        let unfiltered = store.list(owner, None).await.unwrap();
        let empty_filter = store.list(owner, Some("")).await.unwrap();
        assert_eq!(unfiltered, empty_filter);

        let filtered = store.list(owner, Some("Hammer")).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Hammer");
    }

    #[tokio::test]
    async fn test_search_ranks_typo_match() {
        let (store, owner) = store_with_owner().await;
        store.create(owner, draft("Hammer", 1)).await.unwrap();
        store.create(owner, draft("Wrench", 1)).await.unwrap();

        let results = store.search(owner, "Hamer").await.unwrap();
        let names: Vec<&str> = results.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Hammer"]);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_is_already_exists() {
        let (store, owner) = store_with_owner().await;
        let tool = draft("Hammer", 1).into_tool(owner);
        store.insert(&tool).await.unwrap();

        let err = store.insert(&tool).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_foreign_owner_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let store = ToolStore::new(db.pool().clone());
        let owner_a = insert_user(&db).await;
        let owner_b = insert_user(&db).await;

        let tool = store.create(owner_a, draft("Hammer", 5)).await.unwrap();
        let err = store.update(owner_b, &tool).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_applies_patch() {
        let (store, owner) = store_with_owner().await;
        let mut tool = store.create(owner, draft("Hammer", 5)).await.unwrap();

        let patch = ToolPatch {
            quantity: Some(2),
            ..ToolPatch::default()
        };
        patch.apply(&mut tool);
        store.update(owner, &tool).await.unwrap();

        let fetched = store.get_by_id(owner, tool.id).await.unwrap();
        assert_eq!(fetched.quantity, 2);
        assert_eq!(fetched.name, "Hammer");
    }

    #[tokio::test]
    async fn test_update_rejects_negative_quantity() {
        let (store, owner) = store_with_owner().await;
        let mut tool = store.create(owner, draft("Hammer", 5)).await.unwrap();
        tool.quantity = -1;

        let err = store.update(owner, &tool).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (store, owner) = store_with_owner().await;
        let tool = store.create(owner, draft("Hammer", 5)).await.unwrap();

        store.delete(owner, tool.id).await.unwrap();
        let err = store.get_by_id(owner, tool.id).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_not_found() {
        let (store, owner) = store_with_owner().await;
        let err = store.delete(owner, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::NotFound(_))));
    }
}
