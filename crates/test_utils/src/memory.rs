//! In-memory rate repository fake
//!
//! Rows carry the same resolution-relevant columns as the real tables
//! (id, effective_from_date, is_active), and lookups apply the same rules
//! as the SQL adapter: most recent effective date wins with nulls treated
//! as earliest and ties broken by highest id, short-term brackets resolve
//! to the smallest covering threshold, and exchange rates to the latest
//! active row. Tests that exercise tie-breaks are therefore meaningful.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_kernel::{Currency, Rate};
use rust_decimal::Decimal;

use domain_pricing::{
    ExchangeRateQuote, ForeignPremiumRate, Gender, InsuranceType, PlanType, PremiumRateKey,
    RateRepository, RateStoreError,
};

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid date")
}

#[derive(Debug, Clone)]
struct PremiumRateRow {
    id: i64,
    insurance_type: InsuranceType,
    plan_type: PlanType,
    age: u32,
    gender: Gender,
    has_medical_expense: bool,
    annual_premium: Decimal,
    effective_from_date: Option<NaiveDate>,
    is_active: bool,
}

#[derive(Debug, Clone)]
struct ForeignPremiumRateRow {
    id: i64,
    insurance_type: InsuranceType,
    plan_type: PlanType,
    age: u32,
    gender: Gender,
    has_medical_expense: bool,
    currency: Currency,
    korean_premium: Decimal,
    foreign_premium: Decimal,
    effective_from_date: Option<NaiveDate>,
    is_active: bool,
}

#[derive(Debug, Clone)]
struct ShortTermRateRow {
    id: i64,
    insurance_type: InsuranceType,
    period_days: i64,
    rate_percentage: Decimal,
    is_active: bool,
}

#[derive(Debug, Clone)]
struct PlanAdditionalFeeRow {
    id: i64,
    insurance_type: InsuranceType,
    plan_type: PlanType,
    additional_fee: Decimal,
    effective_from_date: Option<NaiveDate>,
    is_active: bool,
}

#[derive(Debug, Clone)]
struct ExchangeRateRow {
    id: i64,
    currency: Currency,
    rate: Decimal,
    rate_date: NaiveDate,
    is_active: bool,
}

/// Vector-backed stand-in for the five rate reference tables
#[derive(Debug, Default)]
pub struct InMemoryRateStore {
    premium_rates: Vec<PremiumRateRow>,
    foreign_premium_rates: Vec<ForeignPremiumRateRow>,
    short_term_rates: Vec<ShortTermRateRow>,
    plan_additional_fees: Vec<PlanAdditionalFeeRow>,
    exchange_rates: Vec<ExchangeRateRow>,
}

impl InMemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an active, undated annual premium row.
    pub fn with_premium_rate(
        self,
        insurance_type: InsuranceType,
        plan_type: &str,
        age: u32,
        gender: Gender,
        has_medical_expense: bool,
        annual_premium: Decimal,
    ) -> Self {
        self.with_dated_premium_rate(
            insurance_type,
            plan_type,
            age,
            gender,
            has_medical_expense,
            annual_premium,
            None,
            true,
        )
    }

    /// Seeds an annual premium row with explicit effective date and active
    /// flag, for resolution-rule tests.
    #[allow(clippy::too_many_arguments)]
    pub fn with_dated_premium_rate(
        mut self,
        insurance_type: InsuranceType,
        plan_type: &str,
        age: u32,
        gender: Gender,
        has_medical_expense: bool,
        annual_premium: Decimal,
        effective_from_date: Option<NaiveDate>,
        is_active: bool,
    ) -> Self {
        let id = self.premium_rates.len() as i64 + 1;
        self.premium_rates.push(PremiumRateRow {
            id,
            insurance_type,
            plan_type: PlanType::new(plan_type),
            age,
            gender,
            has_medical_expense,
            annual_premium,
            effective_from_date,
            is_active,
        });
        self
    }

    /// Seeds an active, undated foreign-currency premium row.
    #[allow(clippy::too_many_arguments)]
    pub fn with_foreign_premium_rate(
        mut self,
        insurance_type: InsuranceType,
        plan_type: &str,
        age: u32,
        gender: Gender,
        has_medical_expense: bool,
        currency: Currency,
        korean_premium: Decimal,
        foreign_premium: Decimal,
    ) -> Self {
        let id = self.foreign_premium_rates.len() as i64 + 1;
        self.foreign_premium_rates.push(ForeignPremiumRateRow {
            id,
            insurance_type,
            plan_type: PlanType::new(plan_type),
            age,
            gender,
            has_medical_expense,
            currency,
            korean_premium,
            foreign_premium,
            effective_from_date: None,
            is_active: true,
        });
        self
    }

    /// Seeds a short-term proration bracket.
    pub fn with_short_term_rate(
        mut self,
        insurance_type: InsuranceType,
        period_days: i64,
        rate_percentage: Decimal,
    ) -> Self {
        let id = self.short_term_rates.len() as i64 + 1;
        self.short_term_rates.push(ShortTermRateRow {
            id,
            insurance_type,
            period_days,
            rate_percentage,
            is_active: true,
        });
        self
    }

    /// Seeds a per-plan surcharge row.
    pub fn with_plan_additional_fee(
        self,
        insurance_type: InsuranceType,
        plan_type: &str,
        additional_fee: Decimal,
    ) -> Self {
        self.with_dated_plan_additional_fee(insurance_type, plan_type, additional_fee, None, true)
    }

    /// Seeds a surcharge row with explicit effective date and active flag.
    pub fn with_dated_plan_additional_fee(
        mut self,
        insurance_type: InsuranceType,
        plan_type: &str,
        additional_fee: Decimal,
        effective_from_date: Option<NaiveDate>,
        is_active: bool,
    ) -> Self {
        let id = self.plan_additional_fees.len() as i64 + 1;
        self.plan_additional_fees.push(PlanAdditionalFeeRow {
            id,
            insurance_type,
            plan_type: PlanType::new(plan_type),
            additional_fee,
            effective_from_date,
            is_active,
        });
        self
    }

    /// Seeds an active exchange-rate row for a date.
    pub fn with_exchange_rate(
        mut self,
        currency: Currency,
        rate: Decimal,
        rate_date: NaiveDate,
    ) -> Self {
        let id = self.exchange_rates.len() as i64 + 1;
        self.exchange_rates.push(ExchangeRateRow {
            id,
            currency,
            rate,
            rate_date,
            is_active: true,
        });
        self
    }
}

#[async_trait]
impl RateRepository for InMemoryRateStore {
    async fn annual_premium(
        &self,
        key: &PremiumRateKey,
    ) -> Result<Option<Decimal>, RateStoreError> {
        let row = self
            .premium_rates
            .iter()
            .filter(|r| {
                r.is_active
                    && r.insurance_type == key.insurance_type
                    && r.plan_type == key.plan_type
                    && r.age == key.age
                    && r.gender == key.gender
                    && r.has_medical_expense == key.has_medical_expense
            })
            .max_by_key(|r| (r.effective_from_date.unwrap_or_else(epoch), r.id));
        Ok(row.map(|r| r.annual_premium))
    }

    async fn foreign_premium(
        &self,
        key: &PremiumRateKey,
        currency: Currency,
    ) -> Result<Option<ForeignPremiumRate>, RateStoreError> {
        let row = self
            .foreign_premium_rates
            .iter()
            .filter(|r| {
                r.is_active
                    && r.insurance_type == key.insurance_type
                    && r.plan_type == key.plan_type
                    && r.age == key.age
                    && r.gender == key.gender
                    && r.has_medical_expense == key.has_medical_expense
                    && r.currency == currency
            })
            .max_by_key(|r| (r.effective_from_date.unwrap_or_else(epoch), r.id));
        Ok(row.map(|r| ForeignPremiumRate {
            korean_premium: r.korean_premium,
            foreign_premium: r.foreign_premium,
        }))
    }

    async fn short_term_rate(
        &self,
        insurance_type: InsuranceType,
        period_days: i64,
    ) -> Result<Option<Rate>, RateStoreError> {
        let row = self
            .short_term_rates
            .iter()
            .filter(|r| {
                r.is_active && r.insurance_type == insurance_type && r.period_days >= period_days
            })
            .min_by_key(|r| (r.period_days, r.id));
        Ok(row.map(|r| Rate::from_percent(r.rate_percentage)))
    }

    async fn plan_additional_fee(
        &self,
        insurance_type: InsuranceType,
        plan_type: &PlanType,
    ) -> Result<Option<Decimal>, RateStoreError> {
        let row = self
            .plan_additional_fees
            .iter()
            .filter(|r| {
                r.is_active && r.insurance_type == insurance_type && &r.plan_type == plan_type
            })
            .max_by_key(|r| (r.effective_from_date.unwrap_or_else(epoch), r.id));
        Ok(row.map(|r| r.additional_fee))
    }

    async fn latest_exchange_rate(
        &self,
        currency: Currency,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError> {
        let row = self
            .exchange_rates
            .iter()
            .filter(|r| r.is_active && r.currency == currency)
            .max_by_key(|r| (r.rate_date, r.id));
        Ok(row.map(|r| ExchangeRateQuote {
            currency: r.currency,
            rate: r.rate,
            rate_date: r.rate_date,
        }))
    }

    async fn exchange_rate_on(
        &self,
        currency: Currency,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError> {
        let row = self
            .exchange_rates
            .iter()
            .filter(|r| r.is_active && r.currency == currency && r.rate_date == date)
            .max_by_key(|r| r.id);
        Ok(row.map(|r| ExchangeRateQuote {
            currency: r.currency,
            rate: r.rate,
            rate_date: r.rate_date,
        }))
    }
}
