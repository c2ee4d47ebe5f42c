//! Travel premium DTOs
//!
//! Request fields the original contract treats as required are `Option`
//! here so their absence maps to a 400 with a field-naming message instead
//! of a deserialization failure. Date fields stay raw strings; the handler
//! parses them so format errors also surface as 400s.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use domain_pricing::{
    CurrencyPlan, Gender, GroupQuote, InsuranceType, ParticipantQuote, PlanType, PremiumQuote,
};

#[derive(Debug, Deserialize)]
pub struct CalculatePremiumRequest {
    pub insurance_type: Option<InsuranceType>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub plan_type: Option<PlanType>,
    pub has_medical_expense: Option<bool>,
    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,
    pub currency_plan: Option<CurrencyPlan>,
    pub travel_country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PremiumResponse {
    pub success: bool,
    pub premium: Decimal,
    pub annual_premium: Decimal,
    /// Applied short-term rate as a percent figure
    pub short_term_rate: Decimal,
    pub period_days: i64,
    /// Settlement currency, present for foreign-currency plans only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

impl From<PremiumQuote> for PremiumResponse {
    fn from(quote: PremiumQuote) -> Self {
        Self {
            success: true,
            premium: quote.premium,
            annual_premium: quote.annual_premium,
            short_term_rate: quote.short_term_rate.as_percent(),
            period_days: quote.period_days,
            currency: quote.currency,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CalculateGroupPremiumRequest {
    pub insurance_type: Option<InsuranceType>,
    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,
    pub insured_persons: Option<Vec<InsuredPersonRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct InsuredPersonRequest {
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub plan_type: Option<PlanType>,
    pub has_medical_expense: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct GroupPremiumResponse {
    pub success: bool,
    pub total_premium: Decimal,
    pub period_days: i64,
    pub insured_persons: Vec<InsuredPersonResponse>,
}

#[derive(Debug, Serialize)]
pub struct InsuredPersonResponse {
    pub age: u32,
    pub gender: Gender,
    /// Effective plan after the children's override
    pub plan_type: PlanType,
    pub premium: Decimal,
    pub annual_premium: Decimal,
    pub short_term_rate: Decimal,
}

impl From<ParticipantQuote> for InsuredPersonResponse {
    fn from(quote: ParticipantQuote) -> Self {
        Self {
            age: quote.age,
            gender: quote.gender,
            plan_type: quote.plan_type,
            premium: quote.premium,
            annual_premium: quote.annual_premium,
            short_term_rate: quote.short_term_rate.as_percent(),
        }
    }
}

impl From<GroupQuote> for GroupPremiumResponse {
    fn from(quote: GroupQuote) -> Self {
        Self {
            success: true,
            total_premium: quote.total_premium,
            period_days: quote.period_days,
            insured_persons: quote
                .participants
                .into_iter()
                .map(InsuredPersonResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRateQuery {
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExchangeRateResponse {
    pub success: bool,
    pub currency: Currency,
    pub exchange_rate: Decimal,
    pub rate_date: NaiveDate,
}
