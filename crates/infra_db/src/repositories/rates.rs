//! PostgreSQL rate repository
//!
//! Read-only adapter over the five rate reference tables. The
//! effective-date resolution rule (most recent `effective_from_date`, nulls
//! treated as 1900-01-01, ties broken by highest id, active rows only) is
//! one shared ORDER BY fragment so every effective-dated lookup resolves
//! rows identically.
//!
//! Queries are runtime-checked: the schema ships as embedded migrations in
//! this crate, so builds must not require a live database.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{Currency, Rate};
use domain_pricing::{
    ExchangeRateQuote, ForeignPremiumRate, InsuranceType, PlanType, PremiumRateKey,
    RateRepository, RateStoreError,
};

/// Shared resolution for effective-dated reference rows
const EFFECTIVE_ROW_ORDER: &str =
    "ORDER BY COALESCE(effective_from_date, DATE '1900-01-01') DESC, id DESC LIMIT 1";

fn store_error(err: sqlx::Error) -> RateStoreError {
    RateStoreError::Query(err.to_string())
}

#[derive(sqlx::FromRow)]
struct ForeignPremiumRow {
    korean_premium: Decimal,
    foreign_premium: Decimal,
}

#[derive(sqlx::FromRow)]
struct ExchangeRateRow {
    currency: String,
    exchange_rate: Decimal,
    rate_date: NaiveDate,
}

impl ExchangeRateRow {
    fn into_quote(self) -> Result<ExchangeRateQuote, RateStoreError> {
        let currency = self
            .currency
            .parse::<Currency>()
            .map_err(|e| RateStoreError::Query(e.to_string()))?;
        Ok(ExchangeRateQuote {
            currency,
            rate: self.exchange_rate,
            rate_date: self.rate_date,
        })
    }
}

/// Rate repository backed by the PostgreSQL reference tables
#[derive(Debug, Clone)]
pub struct PgRateRepository {
    pool: PgPool,
}

impl PgRateRepository {
    /// Creates a new repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateRepository for PgRateRepository {
    async fn annual_premium(
        &self,
        key: &PremiumRateKey,
    ) -> Result<Option<Decimal>, RateStoreError> {
        let sql = format!(
            r#"
            SELECT annual_premium
            FROM premium_rates
            WHERE insurance_type = $1
              AND plan_type = $2
              AND age = $3
              AND gender = $4
              AND has_medical_expense = $5
              AND is_active
            {EFFECTIVE_ROW_ORDER}
            "#
        );
        sqlx::query_scalar::<_, Decimal>(&sql)
            .bind(key.insurance_type.as_str())
            .bind(key.plan_type.as_str())
            .bind(key.age as i32)
            .bind(key.gender.as_str())
            .bind(key.has_medical_expense)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn foreign_premium(
        &self,
        key: &PremiumRateKey,
        currency: Currency,
    ) -> Result<Option<ForeignPremiumRate>, RateStoreError> {
        let sql = format!(
            r#"
            SELECT korean_premium, foreign_premium
            FROM foreign_currency_premium_rates
            WHERE insurance_type = $1
              AND plan_type = $2
              AND age = $3
              AND gender = $4
              AND has_medical_expense = $5
              AND currency = $6
              AND is_active
            {EFFECTIVE_ROW_ORDER}
            "#
        );
        let row = sqlx::query_as::<_, ForeignPremiumRow>(&sql)
            .bind(key.insurance_type.as_str())
            .bind(key.plan_type.as_str())
            .bind(key.age as i32)
            .bind(key.gender.as_str())
            .bind(key.has_medical_expense)
            .bind(currency.code())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

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
        let percent = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT rate_percentage
            FROM short_term_rates
            WHERE insurance_type = $1
              AND period_days >= $2
              AND is_active
            ORDER BY period_days ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(insurance_type.as_str())
        .bind(period_days)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(percent.map(Rate::from_percent))
    }

    async fn plan_additional_fee(
        &self,
        insurance_type: InsuranceType,
        plan_type: &PlanType,
    ) -> Result<Option<Decimal>, RateStoreError> {
        let sql = format!(
            r#"
            SELECT additional_fee
            FROM plan_additional_fees
            WHERE insurance_type = $1
              AND plan_type = $2
              AND is_active
            {EFFECTIVE_ROW_ORDER}
            "#
        );
        sqlx::query_scalar::<_, Decimal>(&sql)
            .bind(insurance_type.as_str())
            .bind(plan_type.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn latest_exchange_rate(
        &self,
        currency: Currency,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError> {
        let row = sqlx::query_as::<_, ExchangeRateRow>(
            r#"
            SELECT currency, exchange_rate, rate_date
            FROM exchange_rates
            WHERE currency = $1
              AND is_active
            ORDER BY rate_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(currency.code())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(ExchangeRateRow::into_quote).transpose()
    }

    async fn exchange_rate_on(
        &self,
        currency: Currency,
        date: NaiveDate,
    ) -> Result<Option<ExchangeRateQuote>, RateStoreError> {
        let row = sqlx::query_as::<_, ExchangeRateRow>(
            r#"
            SELECT currency, exchange_rate, rate_date
            FROM exchange_rates
            WHERE currency = $1
              AND rate_date = $2
              AND is_active
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(currency.code())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(ExchangeRateRow::into_quote).transpose()
    }
}
