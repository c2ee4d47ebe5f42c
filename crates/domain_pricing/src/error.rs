//! Pricing error taxonomy
//!
//! Short-term-rate and additional-fee lookup misses are deliberately NOT
//! errors; they resolve to defined defaults in the calculator. Everything
//! here is propagated synchronously to the caller.

use core_kernel::Currency;
use thiserror::Error;

use crate::repository::PremiumRateKey;

/// Failure reaching or querying the rate store.
///
/// The domain never sees driver-specific error types; adapters flatten
/// them into this.
#[derive(Debug, Error)]
pub enum RateStoreError {
    #[error("rate store query failed: {0}")]
    Query(String),
}

/// Errors a premium calculation can surface
#[derive(Debug, Error)]
pub enum PricingError {
    /// Missing or inconsistent caller input; recoverable by correcting the
    /// request.
    #[error("{0}")]
    Validation(String),

    /// No KRW premium rate row matches the lookup key.
    #[error("no premium rate registered for {key}")]
    RateNotFound { key: PremiumRateKey },

    /// No foreign-currency premium rate row matches the key, after the
    /// designed USD retry where one is permitted.
    #[error("no {currency} premium rate registered for foreign-currency plan ({key})")]
    ForeignRateNotFound {
        key: PremiumRateKey,
        currency: Currency,
    },

    /// No active exchange rate for the resolved currency; rates must be
    /// registered before foreign-currency plans can be quoted.
    #[error("no active {currency} exchange rate registered; register an exchange rate first")]
    ExchangeRateNotFound { currency: Currency },

    /// A group quote failed for one participant; the index is 1-based and
    /// the source carries the attempted lookup key.
    #[error("participant {index}: {source}")]
    Participant {
        index: usize,
        #[source]
        source: Box<PricingError>,
    },

    #[error(transparent)]
    Store(#[from] RateStoreError),
}

impl PricingError {
    pub fn validation(message: impl Into<String>) -> Self {
        PricingError::Validation(message.into())
    }

    pub fn participant(index: usize, source: PricingError) -> Self {
        PricingError::Participant {
            index,
            source: Box::new(source),
        }
    }

    /// True when the error means a required rate row is absent (HTTP 404
    /// at the interface layer). Unwraps participant attribution.
    pub fn is_not_found(&self) -> bool {
        match self {
            PricingError::RateNotFound { .. }
            | PricingError::ForeignRateNotFound { .. }
            | PricingError::ExchangeRateNotFound { .. } => true,
            PricingError::Participant { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// True when the error is caller-correctable input (HTTP 400).
    pub fn is_validation(&self) -> bool {
        match self {
            PricingError::Validation(_) => true,
            PricingError::Participant { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, InsuranceType, PlanType};

    fn key() -> PremiumRateKey {
        PremiumRateKey {
            insurance_type: InsuranceType::DomesticTravel,
            plan_type: PlanType::new("Standard Plan"),
            age: 30,
            gender: Gender::Male,
            has_medical_expense: false,
        }
    }

    #[test]
    fn test_rate_not_found_names_the_key() {
        let message = PricingError::RateNotFound { key: key() }.to_string();
        assert!(message.contains("domestic travel insurance"));
        assert!(message.contains("Standard Plan"));
        assert!(message.contains("age=30"));
    }

    #[test]
    fn test_participant_wrapper_is_one_based_and_classified() {
        let inner = PricingError::RateNotFound { key: key() };
        let wrapped = PricingError::participant(2, inner);
        assert!(wrapped.to_string().starts_with("participant 2:"));
        assert!(wrapped.is_not_found());
        assert!(!wrapped.is_validation());
    }

    #[test]
    fn test_validation_classification() {
        let err = PricingError::validation("arrival must be after departure");
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }
}
