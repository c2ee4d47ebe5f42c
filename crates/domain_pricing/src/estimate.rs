//! Estimate-quote pricing
//!
//! The estimate/email flow prices participants from a `YYYYMMDD` birth
//! date: adults get the Economy Plan, under-15s the Children's Plan, always
//! on the KRW path without medical-expense cover or plan surcharges. A
//! participant whose rate row is missing is listed at a zero premium so the
//! estimate document still renders; genuine store failures propagate.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use core_kernel::{floor_to_ten, period_days};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::calculator::PremiumCalculator;
use crate::error::PricingError;
use crate::repository::{PremiumRateKey, RateRepository};
use crate::types::{Gender, InsuranceType, PlanType};

/// Computes age in completed years from a `YYYYMMDD` birth date.
///
/// # Errors
///
/// Returns `Validation` for a malformed birth date or one in the future.
pub fn age_on(birth_date: &str, today: NaiveDate) -> Result<u32, PricingError> {
    let parsed = NaiveDate::parse_from_str(birth_date, "%Y%m%d")
        .map_err(|_| PricingError::validation(format!("invalid birth date: {birth_date}")))?;

    let mut age = today.year() - parsed.year();
    if (today.month(), today.day()) < (parsed.month(), parsed.day()) {
        age -= 1;
    }
    if age < 0 {
        return Err(PricingError::validation(format!(
            "birth date is in the future: {birth_date}"
        )));
    }
    Ok(age as u32)
}

/// One insured person on an estimate request
#[derive(Debug, Clone)]
pub struct EstimateParticipant {
    pub sequence: u32,
    pub gender: Gender,
    /// Birth date as `YYYYMMDD`
    pub birth_date: String,
}

/// Priced line for one estimate participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateLine {
    pub sequence: u32,
    pub gender: Gender,
    pub age: u32,
    pub plan_type: PlanType,
    /// Floor-rounded premium; zero when no rate row matched
    pub premium: Decimal,
}

/// A priced estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateQuote {
    pub total_premium: Decimal,
    pub period_days: i64,
    pub lines: Vec<EstimateLine>,
}

/// Prices estimate documents using the shared calculation logic.
#[derive(Clone)]
pub struct EstimateService {
    calculator: PremiumCalculator,
}

impl EstimateService {
    pub fn new(rates: Arc<dyn RateRepository>) -> Self {
        Self {
            calculator: PremiumCalculator::new(rates),
        }
    }

    /// Prices every participant of an estimate over one shared trip
    /// window.
    ///
    /// `today` is the reference date for age computation, injected so the
    /// split is deterministic in tests.
    pub async fn quote_participants(
        &self,
        insurance_type: InsuranceType,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        participants: &[EstimateParticipant],
        today: NaiveDate,
    ) -> Result<EstimateQuote, PricingError> {
        if participants.is_empty() {
            return Err(PricingError::validation(
                "at least one insured person is required",
            ));
        }

        let period = period_days(departure, arrival)
            .map_err(|e| PricingError::validation(e.to_string()))?;

        let mut lines = Vec::with_capacity(participants.len());
        let mut total_premium = Decimal::ZERO;

        for participant in participants {
            let age = age_on(&participant.birth_date, today)?;
            let plan = PlanType::economy().for_age(age);
            let key = PremiumRateKey {
                insurance_type,
                plan_type: plan.clone(),
                age,
                gender: participant.gender,
                has_medical_expense: false,
            };

            // Estimates prorate the annual premium only; plan surcharges are
            // never added on this path.
            let premium = match self.calculator.krw_annual_premium(&key).await {
                Ok(annual) => {
                    let rate = self.calculator.short_term_rate(insurance_type, period).await?;
                    floor_to_ten(rate.apply(annual))
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(
                        sequence = participant.sequence,
                        age,
                        "no rate row for estimate participant, listing zero premium"
                    );
                    Decimal::ZERO
                }
                Err(e) => return Err(e),
            };

            total_premium += premium;
            lines.push(EstimateLine {
                sequence: participant.sequence,
                gender: participant.gender,
                age,
                plan_type: plan,
                premium,
            });
        }

        Ok(EstimateQuote {
            total_premium,
            period_days: period,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_counts_completed_years() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on("19940615", today).unwrap(), 30);
        assert_eq!(age_on("19940616", today).unwrap(), 29);
        assert_eq!(age_on("19940614", today).unwrap(), 30);
    }

    #[test]
    fn test_age_for_newborn_is_zero() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on("20240615", today).unwrap(), 0);
    }

    #[test]
    fn test_malformed_birth_date_rejected() {
        let today = date(2024, 6, 15);
        assert!(age_on("1994-06-15", today).unwrap_err().is_validation());
        assert!(age_on("9999", today).unwrap_err().is_validation());
        assert!(age_on("", today).unwrap_err().is_validation());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let today = date(2024, 6, 15);
        assert!(age_on("20250101", today).unwrap_err().is_validation());
    }
}
