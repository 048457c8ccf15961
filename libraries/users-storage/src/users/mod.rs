//! Queries against the `users` table
//!
//! Every statement binds its values; nothing is interpolated into SQL.

use crate::error::classify_write;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use users_core::{User, UserFields, UserId, UsersError};

type Result<T> = std::result::Result<T, UsersError>;

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| UsersError::storage(format!("Invalid timestamp: {}", secs)))
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: timestamp(row.try_get("created_at")?)?,
        updated_at: timestamp(row.try_get("updated_at")?)?,
    })
}

/// Cheap round trip used by the health check
pub async fn ping(pool: &SqlitePool) -> bool {
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            false
        }
    }
}

/// Get all users, newest id first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(
        "SELECT id, name, email, created_at, updated_at
         FROM users
         ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_from_row).collect()
}

/// Get a user by id
pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, name, email, created_at, updated_at
         FROM users
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Insert a user and return the stored row
pub async fn insert(pool: &SqlitePool, fields: &UserFields) -> Result<User> {
    let now = Utc::now().timestamp();

    let row = sqlx::query(
        "INSERT INTO users (name, email, created_at, updated_at)
         VALUES (?, ?, ?, ?)
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| classify_write(e, &fields.email))?;

    user_from_row(&row)
}

/// Update name and email; `None` when no row has that id
pub async fn update(pool: &SqlitePool, id: UserId, fields: &UserFields) -> Result<Option<User>> {
    let row = sqlx::query(
        "UPDATE users SET name = ?, email = ?, updated_at = ?
         WHERE id = ?
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(Utc::now().timestamp())
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| classify_write(e, &fields.email))?;

    row.as_ref().map(user_from_row).transpose()
}

/// Delete a user, returning the row as it was before deletion
pub async fn delete(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(
        "DELETE FROM users
         WHERE id = ?
         RETURNING id, name, email, created_at, updated_at",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Number of rows in the table
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
        .fetch_one(pool)
        .await?;

    Ok(row.try_get("count")?)
}
