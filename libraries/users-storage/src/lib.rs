//! Users Storage
//!
//! `SQLite` data access layer for the users service.
//!
//! # Architecture
//!
//! - **Bounded pool**: at most `PoolSettings::max_connections` live
//!   connections; extra callers queue inside the pool until one frees up
//! - **Startup self-check**: `ensure_schema` creates the `users` table if it
//!   is missing
//! - **Vertical slice**: `users` owns every query against the table, all of
//!   them parameterized
//! - **Classified faults**: unique-constraint violations come back as
//!   `UsersError::DuplicateEmail`
//!
//! # Example
//!
//! ```rust,no_run
//! use users_storage::{create_pool, ensure_schema, PoolSettings, SqliteUserStore};
//! use users_core::UserStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://users.db", &PoolSettings::default()).await?;
//! ensure_schema(&pool).await?;
//!
//! let store = SqliteUserStore::new(pool);
//! let users = store.list().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod memory;
pub mod schema;

// Vertical slices
pub mod users;

pub use context::SqliteUserStore;
pub use memory::MemoryUserStore;
pub use schema::{ensure_schema, SchemaStatus};

use sqlx::sqlite::SqlitePool;
use std::time::Duration;

/// Pool sizing and timeouts
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on simultaneous connections
    pub max_connections: u32,

    /// How long a caller may wait in the queue for a free connection
    pub acquire_timeout: Duration,

    /// How long a statement waits on a locked database file
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(60),
            busy_timeout: Duration::from_secs(30),
        }
    }
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://users.db>`)
/// * `settings` - pool bounds and timeouts
///
/// # Errors
///
/// Returns an error if the URL is malformed or the first connection fails
pub async fn create_pool(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(settings.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(
        max_connections = settings.max_connections,
        "SQLite pool created"
    );

    Ok(pool)
}
