//! Single-person premium calculation
//!
//! The calculator orchestrates the lookup stages in a fixed order (base or
//! foreign rate, exchange rate, short-term rate, surcharge) and applies the
//! rounding policy. It is stateless: every quote re-resolves all rates, so
//! results always reflect the latest active rows.

use chrono::{DateTime, Utc};
use core_kernel::{floor_to_ten, period_days, Currency, Rate};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::currency::resolve_currency;
use crate::error::PricingError;
use crate::repository::{PremiumRateKey, RateRepository};
use crate::types::{CurrencyPlan, Gender, InsuranceType, PlanType};

/// Trips of a year or more are always charged the full annual rate.
const FULL_YEAR_DAYS: i64 = 365;

/// Input for a single-person quote
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub insurance_type: InsuranceType,
    pub age: u32,
    pub gender: Gender,
    pub plan_type: PlanType,
    pub has_medical_expense: bool,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub currency_plan: CurrencyPlan,
    pub destination_country: Option<String>,
}

/// A priced quote, including the intermediates callers display for
/// transparency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumQuote {
    /// Final premium in KRW, floor-rounded to a multiple of 10
    pub premium: Decimal,
    /// Annual premium before short-term proration and surcharge
    pub annual_premium: Decimal,
    /// Proration rate applied for the trip length
    pub short_term_rate: Rate,
    /// Insured period in days
    pub period_days: i64,
    /// Settlement currency actually used; present for foreign-currency
    /// plans only
    pub currency: Option<Currency>,
}

/// Prices a single insured person against the rate repository.
#[derive(Clone)]
pub struct PremiumCalculator {
    rates: Arc<dyn RateRepository>,
}

impl PremiumCalculator {
    pub fn new(rates: Arc<dyn RateRepository>) -> Self {
        Self { rates }
    }

    /// Quotes a premium for one insured person.
    ///
    /// Steps: validate the trip window, apply the children's-plan override,
    /// fetch the annual premium on the KRW or foreign-currency path,
    /// prorate by the short-term rate, add the overseas surcharge, and
    /// truncate to 10 KRW.
    ///
    /// # Errors
    ///
    /// * `Validation` — arrival not after departure
    /// * `RateNotFound` / `ForeignRateNotFound` — no premium row matches
    /// * `ExchangeRateNotFound` — foreign plan without an active rate
    pub async fn quote(&self, input: &QuoteInput) -> Result<PremiumQuote, PricingError> {
        let period = period_days(input.departure, input.arrival)
            .map_err(|e| PricingError::validation(e.to_string()))?;

        let plan = input.plan_type.for_age(input.age);
        let key = PremiumRateKey {
            insurance_type: input.insurance_type,
            plan_type: plan,
            age: input.age,
            gender: input.gender,
            has_medical_expense: input.has_medical_expense,
        };
        tracing::debug!(%key, period_days = period, "quoting premium");

        let foreign_path = input.currency_plan.is_foreign()
            && input.insurance_type.supports_foreign_currency();

        let (annual_premium, currency) = if foreign_path {
            let (annual, used) = self
                .foreign_annual_premium(&key, input.destination_country.as_deref())
                .await?;
            (annual, Some(used))
        } else {
            (self.krw_annual_premium(&key).await?, None)
        };

        let short_term_rate = self.short_term_rate(input.insurance_type, period).await?;
        let additional_fee = self.additional_fee(input.insurance_type, &key.plan_type).await?;

        let premium = floor_to_ten(short_term_rate.apply(annual_premium) + additional_fee);
        tracing::debug!(
            %annual_premium,
            rate = %short_term_rate,
            %additional_fee,
            %premium,
            "premium calculated"
        );

        Ok(PremiumQuote {
            premium,
            annual_premium,
            short_term_rate,
            period_days: period,
            currency,
        })
    }

    /// Annual premium on the KRW path.
    pub(crate) async fn krw_annual_premium(
        &self,
        key: &PremiumRateKey,
    ) -> Result<Decimal, PricingError> {
        let annual = self
            .rates
            .annual_premium(key)
            .await?
            .ok_or_else(|| PricingError::RateNotFound { key: key.clone() })?;
        tracing::debug!(%annual, "annual premium resolved");
        Ok(annual)
    }

    /// Annual premium on the foreign-currency path.
    ///
    /// Resolves the settlement currency, fetches the premium row, and
    /// converts the foreign covered portion at the latest active exchange
    /// rate. When the EUR row turns out to be absent and the plan did not
    /// force EUR, retries once with USD; this is the designed fallback, not
    /// error recovery.
    async fn foreign_annual_premium(
        &self,
        key: &PremiumRateKey,
        destination_country: Option<&str>,
    ) -> Result<(Decimal, Currency), PricingError> {
        let resolved = resolve_currency(self.rates.as_ref(), key, destination_country).await?;

        let mut currency = resolved.currency;
        let mut row = self.rates.foreign_premium(key, currency).await?;

        if row.is_none() && currency == Currency::EUR && !resolved.forced {
            tracing::debug!("EUR premium row absent, retrying with USD");
            currency = Currency::USD;
            row = self.rates.foreign_premium(key, currency).await?;
        }

        let row = row.ok_or_else(|| PricingError::ForeignRateNotFound {
            key: key.clone(),
            currency,
        })?;

        let fx = self
            .rates
            .latest_exchange_rate(currency)
            .await?
            .ok_or(PricingError::ExchangeRateNotFound { currency })?;

        let annual = row.korean_premium + row.foreign_premium * fx.rate;
        tracing::debug!(
            %currency,
            korean_premium = %row.korean_premium,
            foreign_premium = %row.foreign_premium,
            exchange_rate = %fx.rate,
            %annual,
            "foreign-currency annual premium resolved"
        );
        Ok((annual, currency))
    }

    /// Short-term proration rate for the trip length.
    ///
    /// Trips of 365 days or more never consult the table. A trip past the
    /// end of the table resolves to 100% by policy; that case is logged as
    /// a warning since it can also mean missing rate data.
    pub(crate) async fn short_term_rate(
        &self,
        insurance_type: InsuranceType,
        period: i64,
    ) -> Result<Rate, PricingError> {
        if period >= FULL_YEAR_DAYS {
            tracing::debug!(period_days = period, "full-year trip, full annual rate");
            return Ok(Rate::full());
        }
        match self.rates.short_term_rate(insurance_type, period).await? {
            Some(rate) => {
                tracing::debug!(period_days = period, %rate, "short-term rate resolved");
                Ok(rate)
            }
            None => {
                tracing::warn!(
                    %insurance_type,
                    period_days = period,
                    "no short-term bracket covers period, applying full annual rate"
                );
                Ok(Rate::full())
            }
        }
    }

    /// Flat per-plan surcharge; zero except for overseas travel insurance
    /// plans that have a fee registered.
    pub(crate) async fn additional_fee(
        &self,
        insurance_type: InsuranceType,
        plan_type: &PlanType,
    ) -> Result<Decimal, PricingError> {
        if !insurance_type.has_plan_surcharge() {
            return Ok(Decimal::ZERO);
        }
        match self
            .rates
            .plan_additional_fee(insurance_type, plan_type)
            .await?
        {
            Some(fee) => {
                tracing::debug!(%plan_type, %fee, "plan surcharge resolved");
                Ok(fee)
            }
            None => {
                tracing::debug!(%plan_type, "no plan surcharge registered, applying zero");
                Ok(Decimal::ZERO)
            }
        }
    }
}
