//! Rate repository port
//!
//! The engine reads five reference tables and nothing else. This port is
//! the only seam between the calculator and storage; the PostgreSQL adapter
//! lives in `infra_db` and the in-memory fake in `test_utils`.
//!
//! Effective-date resolution (most recent `effective_from_date`, nulls
//! treated as earliest, ties broken by highest id, active rows only) is part
//! of each lookup's contract, so every implementation must apply the same
//! rule.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{Currency, Rate};
use rust_decimal::Decimal;
use std::fmt;

use crate::error::RateStoreError;
use crate::types::{Gender, InsuranceType, PlanType};

/// Lookup key for annual premium rows (KRW and foreign-currency tables)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumRateKey {
    pub insurance_type: InsuranceType,
    pub plan_type: PlanType,
    pub age: u32,
    pub gender: Gender,
    pub has_medical_expense: bool,
}

impl fmt::Display for PremiumRateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insurance_type={}, plan_type={}, age={}, gender={}, medical_expense={}",
            self.insurance_type, self.plan_type, self.age, self.gender, self.has_medical_expense
        )
    }
}

/// Premium row for a foreign-currency plan: a KRW-denominated covered
/// portion plus a portion denominated in the plan's settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignPremiumRate {
    pub korean_premium: Decimal,
    pub foreign_premium: Decimal,
}

/// An exchange-rate row: KRW per unit of the foreign currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRateQuote {
    pub currency: Currency,
    pub rate: Decimal,
    pub rate_date: NaiveDate,
}

/// Read-only access to the rate reference tables.
///
/// Every method returns `Ok(None)` for "no matching row"; only transport
/// or query failures are errors. The calculator decides which misses are
/// failures and which resolve to defaults.
#[async_trait]
pub trait RateRepository: Send + Sync {
    /// Active annual premium (KRW) for the key, most recent effective date
    /// winning.
    async fn annual_premium(&self, key: &PremiumRateKey)
        -> Result<Option<Decimal>, RateStoreError>;

    /// Active foreign-currency premium row for the key and currency.
    async fn foreign_premium(
        &self,
        key: &PremiumRateKey,
        currency: Currency,
    ) -> Result<Option<ForeignPremiumRate>, RateStoreError>;

    /// Short-term proration rate: the row with the smallest `period_days`
    /// threshold that is >= the trip length.
    async fn short_term_rate(
        &self,
        insurance_type: InsuranceType,
        period_days: i64,
    ) -> Result<Option<Rate>, RateStoreError>;

    /// Active flat surcharge for the plan, most recent effective date
    /// winning.
    async fn plan_additional_fee(
        &self,
        insurance_type: InsuranceType,
        plan_type: &PlanType,
    ) -> Result<Option<Decimal>, RateStoreError>;

    /// Most recent active exchange rate for the currency, regardless of
    /// date. This is the pricing lookup.
    async fn latest_exchange_rate(
        &self,
        currency: Currency,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError>;

    /// Active exchange rate recorded for exactly the given date, highest id
    /// winning. This feeds the display lookup, not pricing.
    async fn exchange_rate_on(
        &self,
        currency: Currency,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError>;
}
