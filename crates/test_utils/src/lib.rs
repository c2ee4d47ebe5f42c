//! Test Utilities Crate
//!
//! Shared test infrastructure for the pricing engine test suites:
//!
//! - `memory`: an in-memory [`domain_pricing::RateRepository`] fake that
//!   reimplements the same row-resolution rules as the SQL adapter
//! - `fixtures`: seeded stores and request builders for the scenario tests

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use memory::InMemoryRateStore;
