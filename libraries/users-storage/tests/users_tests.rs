//! Integration tests for the `SQLite` user store
//!
//! These tests use REAL `SQLite` files in a temp directory (NOT in-memory):
//! an in-memory URL would give every pooled connection its own database.

use tempfile::TempDir;
use users_core::{UserFields, UserStore};
use users_storage::{
    create_pool, ensure_schema, schema, users, PoolSettings, SchemaStatus, SqliteUserStore,
};

/// Test database wrapper that cleans up on drop
struct TestDb {
    store: SqliteUserStore,
    _temp_dir: TempDir,
}

impl TestDb {
    async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("users.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = create_pool(&db_url, &PoolSettings::default())
            .await
            .expect("Failed to create pool");
        ensure_schema(&pool).await.expect("Failed to create schema");

        Self {
            store: SqliteUserStore::new(pool),
            _temp_dir: temp_dir,
        }
    }
}

fn fields(name: &str, email: &str) -> UserFields {
    UserFields {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_schema_is_created_once() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("fresh.db").display());
    let pool = create_pool(&db_url, &PoolSettings::default()).await.unwrap();

    assert!(!schema::table_exists(&pool).await.unwrap());
    assert_eq!(ensure_schema(&pool).await.unwrap(), SchemaStatus::Created);
    assert!(schema::table_exists(&pool).await.unwrap());
    assert_eq!(ensure_schema(&pool).await.unwrap(), SchemaStatus::Existing);
}

#[tokio::test]
async fn test_create_and_get() {
    let db = TestDb::new().await;

    let created = db.store.create(&fields("Ana", "ana@x.com")).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = db.store.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_orders_by_id_descending() {
    let db = TestDb::new().await;
    let a = db.store.create(&fields("Ana", "a@x.com")).await.unwrap();
    let b = db.store.create(&fields("Bob", "b@x.com")).await.unwrap();
    let c = db.store.create(&fields("Cid", "c@x.com")).await.unwrap();

    let ids: Vec<i64> = db.store.list().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![c.id, b.id, a.id]);
}

#[tokio::test]
async fn test_duplicate_email_is_classified() {
    let db = TestDb::new().await;
    db.store.create(&fields("Ana", "ana@x.com")).await.unwrap();

    let err = db.store.create(&fields("Bob", "ana@x.com")).await.unwrap_err();
    assert!(err.is_conflict(), "expected DuplicateEmail, got {err:?}");

    // The column collates case-insensitively as well
    let err = db.store.create(&fields("Bob", "ANA@x.com")).await.unwrap_err();
    assert!(err.is_conflict());

    assert_eq!(users::count(db.store.pool()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_existing_and_missing() {
    let db = TestDb::new().await;
    let ana = db.store.create(&fields("Ana", "ana@x.com")).await.unwrap();
    let bob = db.store.create(&fields("Bob", "bob@x.com")).await.unwrap();

    let updated = db
        .store
        .update(ana.id, &fields("Ana Maria", "ana.maria@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, ana.id);
    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.email, "ana.maria@x.com");
    assert_eq!(updated.created_at, ana.created_at);

    let err = db
        .store
        .update(bob.id, &fields("Bob", "ana.maria@x.com"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    assert!(db
        .store
        .update(999_999, &fields("Nobody", "nobody@x.com"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_delete_returns_row_then_none() {
    let db = TestDb::new().await;
    let ana = db.store.create(&fields("Ana", "ana@x.com")).await.unwrap();

    let deleted = db.store.delete(ana.id).await.unwrap().unwrap();
    assert_eq!(deleted, ana);
    assert!(db.store.delete(ana.id).await.unwrap().is_none());
    assert!(db.store.get(ana.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_sql_metacharacters_are_stored_verbatim() {
    let db = TestDb::new().await;
    let name = "Robert'); DROP TABLE users;--";

    let user = db.store.create(&fields(name, "bobby@x.com")).await.unwrap();
    assert_eq!(db.store.get(user.id).await.unwrap().unwrap().name, name);
    assert!(schema::table_exists(db.store.pool()).await.unwrap());
}

#[tokio::test]
async fn test_ping() {
    let db = TestDb::new().await;
    assert!(db.store.ping().await);

    db.store.pool().close().await;
    assert!(!db.store.ping().await);
}

#[tokio::test]
async fn test_concurrent_inserts_share_bounded_pool() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("pool.db").display());
    let settings = PoolSettings {
        max_connections: 2,
        ..PoolSettings::default()
    };
    let pool = create_pool(&db_url, &settings).await.unwrap();
    ensure_schema(&pool).await.unwrap();
    let store = SqliteUserStore::new(pool);

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .create(&fields("User", &format!("user{i}@x.com")))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.list().await.unwrap().len(), 16);
    assert!(store.pool().size() <= 2);
}
