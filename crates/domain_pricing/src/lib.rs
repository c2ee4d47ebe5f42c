//! Premium Pricing Domain
//!
//! This crate implements the premium-calculation and short-term-rate pricing
//! engine for the travel insurance platform. The engine is a pure
//! composition of ordered lookup stages over read-only reference data:
//!
//! 1. resolve the settlement currency (foreign-currency plans only)
//! 2. fetch the annual premium (KRW table, or foreign table + exchange rate)
//! 3. prorate by the short-term rate for the trip length
//! 4. add the per-plan surcharge (overseas travel insurance only)
//! 5. truncate the result to the nearest 10 KRW
//!
//! All reference data is reached through the [`RateRepository`] port, so the
//! engine can run against PostgreSQL in production and an in-memory table in
//! tests. The engine holds no state and issues no writes; concurrent quotes
//! are fully independent.

pub mod calculator;
pub mod currency;
pub mod error;
pub mod estimate;
pub mod group;
pub mod repository;
pub mod types;

pub use calculator::{PremiumCalculator, PremiumQuote, QuoteInput};
pub use currency::{display_exchange_rate, is_euro_country, resolve_currency, ResolvedCurrency};
pub use error::{PricingError, RateStoreError};
pub use estimate::{age_on, EstimateLine, EstimateParticipant, EstimateQuote, EstimateService};
pub use group::{GroupParticipant, GroupQuote, GroupQuoteInput, ParticipantQuote};
pub use repository::{ExchangeRateQuote, ForeignPremiumRate, PremiumRateKey, RateRepository};
pub use types::{CurrencyPlan, Gender, InsuranceType, PlanType};
