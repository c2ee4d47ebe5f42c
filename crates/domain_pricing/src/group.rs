//! Group premium aggregation
//!
//! Group and corporate quoting prices every participant over one shared
//! trip window on the KRW path only, rounds each participant's premium
//! individually, and sums the rounded figures. A failed lookup aborts the
//! whole batch and names the failing participant (1-based) together with
//! the attempted lookup key.

use chrono::{DateTime, Utc};
use core_kernel::{period_days, Rate};
use rust_decimal::Decimal;

use crate::calculator::PremiumCalculator;
use crate::error::PricingError;
use crate::repository::PremiumRateKey;
use crate::types::{Gender, InsuranceType, PlanType};

/// One insured person in a group request
#[derive(Debug, Clone)]
pub struct GroupParticipant {
    pub age: u32,
    pub gender: Gender,
    pub plan_type: PlanType,
    pub has_medical_expense: bool,
}

/// Input for a group quote; the trip window is shared by all participants
#[derive(Debug, Clone)]
pub struct GroupQuoteInput {
    pub insurance_type: InsuranceType,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub participants: Vec<GroupParticipant>,
}

/// Per-participant result within a group quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantQuote {
    pub age: u32,
    pub gender: Gender,
    /// Effective plan after the children's override
    pub plan_type: PlanType,
    /// Individually floor-rounded premium (KRW)
    pub premium: Decimal,
    pub annual_premium: Decimal,
    pub short_term_rate: Rate,
}

/// A priced group quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupQuote {
    /// Sum of the per-participant premiums, each already rounded
    pub total_premium: Decimal,
    pub period_days: i64,
    pub participants: Vec<ParticipantQuote>,
}

impl PremiumCalculator {
    /// Quotes a group of insured persons sharing one trip window.
    ///
    /// # Errors
    ///
    /// * `Validation` — empty participant list or invalid trip window
    /// * `Participant { index, .. }` — any per-person failure, index
    ///   1-based
    pub async fn quote_group(&self, input: &GroupQuoteInput) -> Result<GroupQuote, PricingError> {
        if input.participants.is_empty() {
            return Err(PricingError::validation(
                "at least one insured person is required",
            ));
        }

        let period = period_days(input.departure, input.arrival)
            .map_err(|e| PricingError::validation(e.to_string()))?;
        tracing::debug!(
            insurance_type = %input.insurance_type,
            period_days = period,
            participants = input.participants.len(),
            "quoting group premium"
        );

        let mut participants = Vec::with_capacity(input.participants.len());
        let mut total_premium = Decimal::ZERO;

        for (i, participant) in input.participants.iter().enumerate() {
            let quoted = self
                .participant_quote(input.insurance_type, participant, period)
                .await
                .map_err(|e| PricingError::participant(i + 1, e))?;
            total_premium += quoted.premium;
            participants.push(quoted);
        }

        tracing::debug!(%total_premium, "group premium calculated");
        Ok(GroupQuote {
            total_premium,
            period_days: period,
            participants,
        })
    }

    /// Prices one participant on the KRW path: plan override, annual
    /// premium, short-term proration, surcharge, floor-to-10.
    pub(crate) async fn participant_quote(
        &self,
        insurance_type: InsuranceType,
        participant: &GroupParticipant,
        period: i64,
    ) -> Result<ParticipantQuote, PricingError> {
        let plan = participant.plan_type.for_age(participant.age);
        let key = PremiumRateKey {
            insurance_type,
            plan_type: plan,
            age: participant.age,
            gender: participant.gender,
            has_medical_expense: participant.has_medical_expense,
        };

        let annual_premium = self.krw_annual_premium(&key).await?;
        let short_term_rate = self.short_term_rate(insurance_type, period).await?;
        let additional_fee = self.additional_fee(insurance_type, &key.plan_type).await?;

        let premium =
            core_kernel::floor_to_ten(short_term_rate.apply(annual_premium) + additional_fee);

        Ok(ParticipantQuote {
            age: participant.age,
            gender: participant.gender,
            plan_type: key.plan_type,
            premium,
            annual_premium,
            short_term_rate,
        })
    }
}
