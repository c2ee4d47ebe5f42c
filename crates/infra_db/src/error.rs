//! Database error types

use domain_pricing::RateStoreError;
use thiserror::Error;

/// Errors raised by the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<DatabaseError> for RateStoreError {
    fn from(err: DatabaseError) -> Self {
        RateStoreError::Query(err.to_string())
    }
}
