/// Core error types for the users service
use thiserror::Error;

/// Result type alias using `UsersError`
pub type Result<T> = std::result::Result<T, UsersError>;

/// Faults raised by a `UserStore`.
///
/// Stores classify their own driver errors into these variants so callers
/// never inspect store-specific error codes.
#[derive(Error, Debug)]
pub enum UsersError {
    /// The email is already taken by another user
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Storage-level failures that did not come from the driver
    #[error("Storage error: {0}")]
    Storage(String),
}

impl UsersError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this fault is an email-uniqueness violation
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateEmail(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for UsersError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
