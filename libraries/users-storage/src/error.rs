/// Translation of driver errors into `UsersError`
use users_core::UsersError;

/// Classify a failed write that carried `email`.
///
/// A unique-constraint violation can only come from the `email` column, so it
/// becomes `DuplicateEmail`; everything else is a plain database fault.
pub(crate) fn classify_write(err: sqlx::Error, email: &str) -> UsersError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return UsersError::DuplicateEmail(email.to_string());
        }
    }
    UsersError::from(err)
}
