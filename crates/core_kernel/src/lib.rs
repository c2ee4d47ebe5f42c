//! Core types for the travel insurance pricing engine.
//!
//! This crate carries the primitives every other layer depends on:
//! - **money**: settlement currencies, percentage rates, and the 10-won
//!   truncation rule applied to every final premium
//! - **temporal**: trip-window parsing and the day-count arithmetic that
//!   drives short-term proration

pub mod money;
pub mod temporal;

pub use money::{floor_to_ten, Currency, CurrencyParseError, Rate};
pub use temporal::{parse_instant, period_days, TemporalError};
