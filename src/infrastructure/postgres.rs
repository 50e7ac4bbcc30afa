//! `PostgreSQL` repository implementation.
//!
//! This module provides the production wish store using `sqlx`. The two
//! secondary access paths of the wall map onto ordinary B-tree indexes.
//! The table name comes from configuration (`wishes` by default).
//!
//! # Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - Keyset pagination on `(created_at, wish_id)`
//! - All operations return boxed futures for effect encapsulation
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE wishes (
//!     wish_id    TEXT PRIMARY KEY,
//!     user_id    TEXT NOT NULL,
//!     nickname   TEXT NOT NULL,
//!     content    TEXT NOT NULL,
//!     gender     TEXT NOT NULL,
//!     contact    TEXT NOT NULL DEFAULT '',
//!     created_at BIGINT NOT NULL,
//!     status     TEXT NOT NULL
//! );
//! CREATE INDEX idx_wishes_status_created_at ON wishes (status, created_at DESC, wish_id DESC);
//! CREATE INDEX idx_wishes_user_id_status ON wishes (user_id, status);
//! ```

use futures::FutureExt;
use sqlx::PgPool;

use crate::domain::{Gender, Timestamp, UnknownVariant, UserId, Wish, WishId, WishStatus};
use crate::infrastructure::{
    ActivePageQuery, Page, RepositoryError, RepositoryFuture, WishRepository,
};

/// Statements that create `table` and its indexes when absent.
fn schema_statements(table: &str) -> [String; 3] {
    [
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                wish_id    TEXT PRIMARY KEY,
                user_id    TEXT NOT NULL,
                nickname   TEXT NOT NULL,
                content    TEXT NOT NULL,
                gender     TEXT NOT NULL,
                contact    TEXT NOT NULL DEFAULT '',
                created_at BIGINT NOT NULL,
                status     TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_status_created_at
                ON {table} (status, created_at DESC, wish_id DESC)"
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_user_id_status
                ON {table} (user_id, status)"
        ),
    ]
}

const SELECT_COLUMNS: &str =
    "wish_id, user_id, nickname, content, gender, contact, created_at, status";

/// Raw row as selected by [`SELECT_COLUMNS`].
type WishRow = (String, String, String, String, String, String, i64, String);

/// Maps a raw row back into a wish.
///
/// Fails with `SerializationError` when an enum column holds an unknown value.
fn wish_from_row(row: WishRow) -> Result<Wish, RepositoryError> {
    let (wish_id, user_id, nickname, content, gender, contact, created_at, status) = row;

    let gender: Gender = gender.parse().map_err(serialization_error)?;
    let status: WishStatus = status.parse().map_err(serialization_error)?;

    Ok(Wish {
        wish_id: WishId::new(wish_id),
        user_id: UserId::new(user_id),
        nickname,
        content,
        gender,
        contact,
        created_at: Timestamp::from_millis(created_at),
        status,
    })
}

#[allow(clippy::needless_pass_by_value)]
fn serialization_error(error: UnknownVariant) -> RepositoryError {
    RepositoryError::SerializationError(error.to_string())
}

fn database_error(error: &sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

/// `PostgreSQL` implementation of `WishRepository`.
///
/// # Example
///
/// ```ignore
/// use wish_wall::infrastructure::PostgresWishRepository;
///
/// let pool = PgPool::connect("postgres://localhost/wishes").await?;
/// let repository = PostgresWishRepository::new(pool, "wishes");
/// repository.ensure_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresWishRepository {
    pool: PgPool,
    /// Validated SQL identifier; see `RepositoryConfig::validate`.
    table: String,
}

impl PostgresWishRepository {
    /// Creates a new repository over `table` with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool, table: impl Into<String>) -> Self {
        Self {
            pool,
            table: table.into(),
        }
    }

    /// Creates the table and its indexes if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if any DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        for statement in schema_statements(&self.table) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|error| database_error(&error))?;
        }
        tracing::debug!(table = %self.table, "Wish schema ensured");
        Ok(())
    }
}

impl WishRepository for PostgresWishRepository {
    fn save(&self, wish: &Wish) -> RepositoryFuture<()> {
        let pool = self.pool.clone();
        let table = self.table.clone();
        let wish = wish.clone();

        async move {
            sqlx::query(&format!(
                "INSERT INTO {table}
                    (wish_id, user_id, nickname, content, gender, contact, created_at, status)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
            ))
            .bind(wish.wish_id.as_str())
            .bind(wish.user_id.as_str())
            .bind(&wish.nickname)
            .bind(&wish.content)
            .bind(wish.gender.as_str())
            .bind(&wish.contact)
            .bind(wish.created_at.as_millis())
            .bind(wish.status.as_str())
            .execute(&pool)
            .await
            .map_err(|error| match &error {
                sqlx::Error::Database(database) if database.is_unique_violation() => {
                    RepositoryError::AlreadyExists(wish.wish_id.to_string())
                }
                _ => database_error(&error),
            })?;

            Ok(())
        }
        .boxed()
    }

    fn find_by_id(&self, id: &WishId) -> RepositoryFuture<Option<Wish>> {
        let pool = self.pool.clone();
        let table = self.table.clone();
        let id = id.clone();

        async move {
            let row: Option<WishRow> = sqlx::query_as(&format!(
                "SELECT {SELECT_COLUMNS} FROM {table} WHERE wish_id = $1"
            ))
            .bind(id.as_str())
            .fetch_optional(&pool)
            .await
            .map_err(|error| database_error(&error))?;

            row.map(wish_from_row).transpose()
        }
        .boxed()
    }

    fn list_active(&self, query: ActivePageQuery) -> RepositoryFuture<Page<Wish>> {
        let pool = self.pool.clone();
        let table = self.table.clone();

        async move {
            let (start_created_at, start_wish_id) = query
                .exclusive_start_key
                .map(|key| (key.created_at.as_millis(), key.wish_id.as_str().to_string()))
                .unzip();

            let rows: Vec<WishRow> = sqlx::query_as(&format!(
                "SELECT {SELECT_COLUMNS} FROM {table}
                 WHERE status = 'active'
                   AND ($1::BIGINT IS NULL OR (created_at, wish_id) < ($1::BIGINT, $2::TEXT))
                 ORDER BY created_at DESC, wish_id DESC
                 LIMIT $3"
            ))
            .bind(start_created_at)
            .bind(start_wish_id)
            .bind(i64::from(query.limit) + 1)
            .fetch_all(&pool)
            .await
            .map_err(|error| database_error(&error))?;

            let candidates = rows
                .into_iter()
                .map(wish_from_row)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Page::from_overfetch(candidates, query.limit))
        }
        .boxed()
    }

    fn count_active_by_user(&self, user_id: &UserId) -> RepositoryFuture<u64> {
        let pool = self.pool.clone();
        let table = self.table.clone();
        let user_id = user_id.clone();

        async move {
            let count_row: (i64,) = sqlx::query_as(&format!(
                "SELECT COUNT(*) FROM {table} WHERE user_id = $1 AND status = 'active'"
            ))
            .bind(user_id.as_str())
            .fetch_one(&pool)
            .await
            .map_err(|error| database_error(&error))?;

            #[allow(clippy::cast_sign_loss)]
            let count = count_row.0 as u64;
            Ok(count)
        }
        .boxed()
    }

    fn scan_active(&self) -> RepositoryFuture<Vec<Wish>> {
        let pool = self.pool.clone();
        let table = self.table.clone();

        async move {
            let rows: Vec<WishRow> = sqlx::query_as(&format!(
                "SELECT {SELECT_COLUMNS} FROM {table} WHERE status = 'active'"
            ))
            .fetch_all(&pool)
            .await
            .map_err(|error| database_error(&error))?;

            rows.into_iter().map(wish_from_row).collect()
        }
        .boxed()
    }

    fn mark_released(&self, id: &WishId) -> RepositoryFuture<()> {
        let pool = self.pool.clone();
        let table = self.table.clone();
        let id = id.clone();

        async move {
            let result = sqlx::query(&format!(
                "UPDATE {table} SET status = 'released' WHERE wish_id = $1"
            ))
            .bind(id.as_str())
            .execute(&pool)
            .await
            .map_err(|error| database_error(&error))?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(id.to_string()));
            }
            Ok(())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
