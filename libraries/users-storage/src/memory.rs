//! In-memory implementation of `UserStore`
//!
//! Backs the `demo` server variant and doubles as a test store. Nothing is
//! persisted; the uniqueness rule is checked under the write lock.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use users_core::{Result, User, UserFields, UserId, UserStore, UsersError};

#[derive(Debug, Default)]
struct MemoryState {
    last_id: UserId,
    users: Vec<User>,
}

impl MemoryState {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }

    fn insert(&mut self, fields: &UserFields) -> Result<User> {
        if self.email_taken(&fields.email, None) {
            return Err(UsersError::DuplicateEmail(fields.email.clone()));
        }

        let now = Utc::now();
        self.last_id += 1;
        let user = User {
            id: self.last_id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.push(user.clone());
        Ok(user)
    }
}

/// Volatile user store
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    state: RwLock<MemoryState>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `seed`, ids assigned in order
    pub fn seeded(seed: &[UserFields]) -> Result<Self> {
        let mut state = MemoryState::default();
        for fields in seed {
            state.insert(fields)?;
        }
        Ok(Self {
            state: RwLock::new(state),
        })
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<User>> {
        let state = self.state.read().await;
        let mut users = state.users.clone();
        users.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(users)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, fields: &UserFields) -> Result<User> {
        self.state.write().await.insert(fields)
    }

    async fn update(&self, id: UserId, fields: &UserFields) -> Result<Option<User>> {
        let mut state = self.state.write().await;

        let Some(index) = state.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        if state.email_taken(&fields.email, Some(id)) {
            return Err(UsersError::DuplicateEmail(fields.email.clone()));
        }

        let user = &mut state.users[index];
        user.name.clone_from(&fields.name);
        user.email.clone_from(&fields.email);
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>> {
        let mut state = self.state.write().await;
        let index = state.users.iter().position(|u| u.id == id);
        Ok(index.map(|i| state.users.remove(i)))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryUserStore::new();
        for (name, email) in [("Ana", "a@x.com"), ("Bob", "b@x.com"), ("Cid", "c@x.com")] {
            store.create(&fields(name, email)).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Cid", "Bob", "Ana"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_on_create_and_update() {
        let store = MemoryUserStore::new();
        store.create(&fields("Ana", "ana@x.com")).await.unwrap();
        let bob = store.create(&fields("Bob", "bob@x.com")).await.unwrap();

        let err = store.create(&fields("Ana 2", "ana@x.com")).await.unwrap_err();
        assert!(err.is_conflict());

        let err = store
            .update(bob.id, &fields("Bob", "ana@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // Keeping one's own email is not a conflict
        let bob = store
            .update(bob.id, &fields("Robert", "bob@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bob.name, "Robert");
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = MemoryUserStore::new();
        assert!(store.get(42).await.unwrap().is_none());
        assert!(store.update(42, &fields("Ana", "a@x.com")).await.unwrap().is_none());
        assert!(store.delete(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_prior_row_once() {
        let store = MemoryUserStore::seeded(&[fields("Ana", "ana@x.com")]).unwrap();

        let deleted = store.delete(1).await.unwrap().unwrap();
        assert_eq!(deleted.email, "ana@x.com");
        assert!(store.delete(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let store = MemoryUserStore::new();
        let first = store.create(&fields("Ana", "ana@x.com")).await.unwrap();
        store.delete(first.id).await.unwrap();

        let second = store.create(&fields("Ana", "ana@x.com")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_seed_rejects_duplicates() {
        let result = MemoryUserStore::seeded(&[fields("Ana", "a@x.com"), fields("Bea", "A@x.com")]);
        assert!(result.is_err());
    }
}
