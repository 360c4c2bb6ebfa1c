//! Storage layer for the JLPT tutor backend.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod card_repository;
pub mod error;
pub mod kanji_repository;
pub mod meta_repository;
pub mod progress_repository;
pub mod review_repository;
pub mod session_repository;
pub mod tutor_context_repository;
pub mod vocab_repository;

pub use card_repository::CardRepository;
pub use error::StorageError;
pub use kanji_repository::KanjiRepository;
pub use meta_repository::MetaRepository;
pub use progress_repository::ProgressRepository;
pub use review_repository::ReviewRepository;
pub use session_repository::SessionRepository;
pub use tutor_context_repository::TutorContextRepository;
pub use vocab_repository::VocabRepository;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool, StorageError> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(StorageError::Connection)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(StorageError::Migration)
}

/// Check database connectivity.
pub async fn check_connection(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(StorageError::Query)?;
    Ok(())
}
