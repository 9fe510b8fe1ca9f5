//! Store error type shared by every backend.

/// Errors returned by [`ContentStore`](crate::ContentStore) and
/// [`OperatorStore`](crate::OperatorStore) implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No content row exists for the requested section name.
    #[error("content section '{0}' not found")]
    NotFound(String),

    /// A unique constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transport, permission, or any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return StoreError::Conflict(format!(
                    "duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
        StoreError::Backend(err.to_string())
    }
}
