//! Storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("Query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation violates an invariant — e.g. a duplicate `memory_cards`
    /// row for the same `(item_type, item_id)` (invariant I1). Distinguished
    /// from a generic `Query` error so the HTTP boundary can map it to 409
    /// instead of 500 (spec §4.1, §7, property P10).
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Input rejected before touching the database — e.g. a grade outside
    /// SM-2's 0..=5 range (spec §7: a 400, never a 404).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Classifies a raw `sqlx::Error` into [`StorageError::Integrity`] when it's
/// a unique-constraint violation, [`StorageError::Query`] otherwise.
pub fn classify_query_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StorageError::Integrity(db_err.message().to_string())
        }
        _ => StorageError::Query(err),
    }
}
