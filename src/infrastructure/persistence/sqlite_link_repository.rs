//! SQLite implementation of link repository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{InsertError, StorageError};
use crate::domain::repositories::LinkRepository;
use crate::utils::db_error::is_unique_violation_on_code;

/// Row shape shared by every query that returns a link.
#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    long_url: String,
    created_at: i64,
    clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.code, row.long_url, row.created_at, row.clicks)
    }
}

/// SQLite repository for link storage and retrieval.
///
/// Every mutation is one statement, so SQLite's per-statement atomicity is
/// what guarantees unique codes and lossless click counting.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, InsertError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, long_url, created_at, clicks)
            VALUES (?1, ?2, ?3, 0)
            RETURNING code, long_url, created_at, clicks
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.long_url)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => Err(InsertError::Collision {
                code: new_link.code,
            }),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, StorageError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT code, long_url, created_at, clicks FROM links WHERE code = ?1",
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<Link>, StorageError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links SET clicks = clicks + 1
            WHERE code = ?1
            RETURNING code, long_url, created_at, clicks
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<Link>, StorageError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, long_url, created_at, clicks
            FROM links
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, StorageError> {
        let affected = sqlx::query("DELETE FROM links WHERE code = ?1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
