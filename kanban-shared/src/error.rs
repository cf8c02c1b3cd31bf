/// Error taxonomy for kanban operations
///
/// Every service operation returns [`KanbanResult`]. The first five variants are
/// the domain taxonomy surfaced to callers; everything else is an opaque
/// internal failure (database connectivity, hashing, task join errors) that the
/// boundary layer should log and report generically.
///
/// No operation retries on its own. Retry and backoff policy, if any, belongs to
/// the caller.

use crate::auth::password::PasswordError;

/// Result alias used by the service layer
pub type KanbanResult<T> = Result<T, KanbanError>;

/// PostgreSQL SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Errors returned by kanban services
#[derive(Debug, thiserror::Error)]
pub enum KanbanError {
    /// Malformed or missing input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness violation (duplicate email, existing membership)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authenticated but not authorized
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad credentials
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Any other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl KanbanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// True for failures outside the domain taxonomy
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            KanbanError::Database(_) | KanbanError::Password(_) | KanbanError::Internal(_)
        )
    }
}

/// Checks whether a database error is a unique constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}
