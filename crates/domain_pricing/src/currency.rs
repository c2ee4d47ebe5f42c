//! Settlement-currency resolution for foreign-currency plans
//!
//! Rules, in order:
//! 1. "Working Holiday (Euro Plan)" settles in EUR unconditionally — no
//!    USD fallback exists for it.
//! 2. A Eurozone destination settles in EUR if an EUR premium row exists
//!    for the lookup key.
//! 3. Everything else settles in USD.
//!
//! This module also carries the display-side exchange-rate lookup, which
//! uses a different freshness policy than pricing (yesterday's rate
//! preferred, latest as fallback). The two policies are intentionally kept
//! separate.

use chrono::{Duration, NaiveDate};
use core_kernel::Currency;

use crate::error::{PricingError, RateStoreError};
use crate::repository::{ExchangeRateQuote, PremiumRateKey, RateRepository};

/// Destinations whose foreign covered portion is quoted in EUR
const EURO_COUNTRIES: [&str; 19] = [
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Netherlands",
    "Belgium",
    "Greece",
    "Portugal",
    "Austria",
    "Finland",
    "Ireland",
    "Luxembourg",
    "Slovakia",
    "Slovenia",
    "Estonia",
    "Latvia",
    "Lithuania",
    "Malta",
    "Cyprus",
];

/// True if the destination country is in the Eurozone set
pub fn is_euro_country(country: &str) -> bool {
    EURO_COUNTRIES.contains(&country)
}

/// Outcome of currency resolution.
///
/// `forced` records that the plan itself mandates the currency, in which
/// case the calculator must not retry with USD when the rate row is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCurrency {
    pub currency: Currency,
    pub forced: bool,
}

/// Resolves the settlement currency for a foreign-currency plan.
///
/// The Eurozone branch probes the repository for an EUR premium row; a
/// Eurozone destination without EUR data falls through to USD here rather
/// than failing.
pub async fn resolve_currency(
    rates: &dyn RateRepository,
    key: &PremiumRateKey,
    destination_country: Option<&str>,
) -> Result<ResolvedCurrency, PricingError> {
    if key.plan_type.is_working_holiday_euro() {
        tracing::debug!(plan_type = %key.plan_type, "plan forces EUR settlement");
        return Ok(ResolvedCurrency {
            currency: Currency::EUR,
            forced: true,
        });
    }

    if let Some(country) = destination_country {
        if is_euro_country(country) && rates.foreign_premium(key, Currency::EUR).await?.is_some() {
            tracing::debug!(%country, "Eurozone destination with EUR rate data, settling in EUR");
            return Ok(ResolvedCurrency {
                currency: Currency::EUR,
                forced: false,
            });
        }
    }

    Ok(ResolvedCurrency {
        currency: Currency::USD,
        forced: false,
    })
}

/// Exchange rate for display purposes: prefers the rate recorded yesterday
/// and falls back to the most recent active rate.
///
/// Pricing never uses this; it always takes the latest active rate via
/// [`RateRepository::latest_exchange_rate`].
pub async fn display_exchange_rate(
    rates: &dyn RateRepository,
    currency: Currency,
    today: NaiveDate,
) -> Result<Option<ExchangeRateQuote>, RateStoreError> {
    let yesterday = today - Duration::days(1);
    if let Some(quote) = rates.exchange_rate_on(currency, yesterday).await? {
        return Ok(Some(quote));
    }
    rates.latest_exchange_rate(currency).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euro_country_membership() {
        assert!(is_euro_country("Germany"));
        assert!(is_euro_country("Cyprus"));
        assert!(!is_euro_country("United Kingdom"));
        assert!(!is_euro_country("Japan"));
        // case-sensitive by design: keys come from a fixed frontend list
        assert!(!is_euro_country("germany"));
    }
}
