use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Stable error kinds surfaced by the lifecycle core.
///
/// `InvalidState` and `Conflict` are always reported to the caller; the one
/// exception is a unique-constraint violation on contract creation, which the
/// winner selection engine swallows as an idempotent no-op. `Transient`
/// failures are safe to retry from outside: the finalize sequence either
/// commits fully or rolls back fully.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Transient(#[from] DbErr),
}

impl LifecycleError {
    /// Whether a storage error is a unique-constraint violation. Used to
    /// recognise duplicate offers and concurrent contract creation.
    pub fn is_unique_violation(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }

    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{what} {id} not found"))
    }
}
