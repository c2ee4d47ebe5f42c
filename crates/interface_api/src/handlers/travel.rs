//! Travel premium handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use std::str::FromStr;

use core_kernel::{parse_instant, Currency};
use domain_pricing::{
    display_exchange_rate, GroupParticipant, GroupQuoteInput, PremiumCalculator, QuoteInput,
};

use crate::dto::travel::*;
use crate::error::ApiError;
use crate::AppState;

fn require<T>(value: Option<T>, name: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::missing_field(name))
}

fn parse_date(raw: &str, name: &str) -> Result<DateTime<Utc>, ApiError> {
    parse_instant(raw).map_err(|e| ApiError::BadRequest(format!("{name}: {e}")))
}

/// Quotes a premium for one insured person
pub async fn calculate_premium(
    State(state): State<AppState>,
    Json(request): Json<CalculatePremiumRequest>,
) -> Result<Json<PremiumResponse>, ApiError> {
    let input = QuoteInput {
        insurance_type: require(request.insurance_type, "insurance_type")?,
        age: require(request.age, "age")?,
        gender: require(request.gender, "gender")?,
        plan_type: require(request.plan_type, "plan_type")?,
        has_medical_expense: request.has_medical_expense.unwrap_or(false),
        departure: parse_date(
            &require(request.departure_date, "departure_date")?,
            "departure_date",
        )?,
        arrival: parse_date(
            &require(request.arrival_date, "arrival_date")?,
            "arrival_date",
        )?,
        currency_plan: request.currency_plan.unwrap_or_default(),
        destination_country: request.travel_country,
    };

    let calculator = PremiumCalculator::new(state.rates.clone());
    let quote = calculator.quote(&input).await?;
    Ok(Json(PremiumResponse::from(quote)))
}

/// Quotes a group of insured persons sharing one trip window
pub async fn calculate_group_premium(
    State(state): State<AppState>,
    Json(request): Json<CalculateGroupPremiumRequest>,
) -> Result<Json<GroupPremiumResponse>, ApiError> {
    let persons = require(request.insured_persons, "insured_persons")?;
    let mut participants = Vec::with_capacity(persons.len());
    for person in persons {
        participants.push(GroupParticipant {
            age: require(person.age, "age")?,
            gender: require(person.gender, "gender")?,
            plan_type: require(person.plan_type, "plan_type")?,
            has_medical_expense: person.has_medical_expense.unwrap_or(false),
        });
    }

    let input = GroupQuoteInput {
        insurance_type: require(request.insurance_type, "insurance_type")?,
        departure: parse_date(
            &require(request.departure_date, "departure_date")?,
            "departure_date",
        )?,
        arrival: parse_date(
            &require(request.arrival_date, "arrival_date")?,
            "arrival_date",
        )?,
        participants,
    };

    let calculator = PremiumCalculator::new(state.rates.clone());
    let quote = calculator.quote_group(&input).await?;
    Ok(Json(GroupPremiumResponse::from(quote)))
}

/// Returns the display exchange rate for a foreign currency.
///
/// Prefers yesterday's recorded rate and falls back to the latest active
/// one; the pricing path does not use this lookup.
pub async fn exchange_rate(
    State(state): State<AppState>,
    Query(query): Query<ExchangeRateQuery>,
) -> Result<Json<ExchangeRateResponse>, ApiError> {
    let code = require(query.currency, "currency")?;
    let currency = Currency::from_str(&code).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    if !currency.is_foreign() {
        return Err(ApiError::BadRequest(format!(
            "exchange rates are only tracked for foreign currencies, not {currency}"
        )));
    }

    let today = Utc::now().date_naive();
    let quote = display_exchange_rate(state.rates.as_ref(), currency, today)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("no active {currency} exchange rate registered"))
        })?;

    Ok(Json(ExchangeRateResponse {
        success: true,
        currency: quote.currency,
        exchange_rate: quote.rate,
        rate_date: quote.rate_date,
    }))
}
