//! Error types for the fundi-db crate.

use thiserror::Error;

/// Database operation errors.
///
/// Wraps `SQLx` errors with additional context so callers can distinguish
/// connection trouble from query failures and map each to the right
/// boundary behavior.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// The store rejected a write it never acknowledged; used by in-memory
    /// test stores to simulate an outage window.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation failed.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl DbError {
    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Check if this error indicates a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DbError::ConnectionFailed(err)
            }
            sqlx::Error::RowNotFound => DbError::NotFound("row not found".to_string()),
            other => DbError::QueryFailed(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DbError::NotFound("worker abc".to_string());
        assert_eq!(err.to_string(), "Not found: worker abc");

        let err = DbError::ValidationFailed("name required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name required");
    }

    #[test]
    fn test_from_sqlx_row_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_sqlx_pool_timeout_is_connection_error() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(err.is_connection_error());
    }
}
