//! Startup self-check of the `users` table

use sqlx::SqlitePool;
use users_core::Result;

const TABLE: &str = "users";

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 100),
    email TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (length(email) <= 100),
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
)";

/// Outcome of `ensure_schema`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    /// The table was already there
    Existing,
    /// The table was missing and has been created
    Created,
}

/// Check whether the `users` table exists
pub async fn table_exists(pool: &SqlitePool) -> Result<bool> {
    let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
        .bind(TABLE)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Verify the `users` table and create it when absent.
///
/// This should be called once when the application starts.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<SchemaStatus> {
    if table_exists(pool).await? {
        tracing::debug!("Table '{}' found", TABLE);
        return Ok(SchemaStatus::Existing);
    }

    tracing::warn!("Table '{}' not found, creating it", TABLE);
    sqlx::query(CREATE_USERS).execute(pool).await?;
    tracing::info!("Table '{}' created", TABLE);

    Ok(SchemaStatus::Created)
}
