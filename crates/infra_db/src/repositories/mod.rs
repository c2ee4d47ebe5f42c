//! Repository implementations

pub mod rates;

pub use rates::PgRateRepository;
