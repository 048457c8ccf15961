//! `SQLite` implementation of `UserStore`

use crate::users;
use async_trait::async_trait;
use sqlx::SqlitePool;
use users_core::{Result, User, UserFields, UserId, UserStore};

/// User store backed by a pooled `SQLite` database
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Wrap an existing pool. The schema must already be in place
    /// (see `ensure_schema`).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn ping(&self) -> bool {
        users::ping(&self.pool).await
    }

    async fn list(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn create(&self, fields: &UserFields) -> Result<User> {
        users::insert(&self.pool, fields).await
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<Option<User>> {
        users::update(&self.pool, id, fields).await
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>> {
        users::delete(&self.pool, id).await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
