//! Storage trait for the users table

use crate::error::Result;
use crate::types::{User, UserFields, UserId};
use async_trait::async_trait;

/// Access to the persisted users.
///
/// Implementations are injected into the HTTP layer as `Arc<dyn UserStore>`.
/// Absence is reported as `Ok(None)` rather than an error, and an email
/// uniqueness violation must come back as `UsersError::DuplicateEmail`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Reachability check. Never fails; any problem is `false`.
    async fn ping(&self) -> bool;

    /// All users, highest id first
    async fn list(&self) -> Result<Vec<User>>;

    /// User by id
    async fn get(&self, id: UserId) -> Result<Option<User>>;

    /// Insert a user; the store assigns id and timestamps
    async fn create(&self, fields: &UserFields) -> Result<User>;

    /// Replace name and email of an existing user
    async fn update(&self, id: UserId, fields: &UserFields) -> Result<Option<User>>;

    /// Hard delete, returning the row as it was
    async fn delete(&self, id: UserId) -> Result<Option<User>>;

    /// Short label used in logs and the health report
    fn backend(&self) -> &'static str;
}
