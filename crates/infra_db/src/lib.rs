//! Database infrastructure layer
//!
//! PostgreSQL access for the pricing engine: connection pool management and
//! the [`PgRateRepository`] adapter implementing the
//! [`domain_pricing::RateRepository`] port over the five rate reference
//! tables.
//!
//! The schema ships as embedded migrations; run [`MIGRATOR`] at startup.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::PgRateRepository;

/// Embedded SQL migrations for the rate reference tables
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
