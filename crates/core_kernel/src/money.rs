//! Currency and rounding primitives
//!
//! Premiums are quoted and settled in KRW; foreign-currency plans carry a
//! covered portion denominated in USD or EUR that is converted to KRW via a
//! stored exchange rate. All arithmetic uses rust_decimal so monetary
//! results are bit-exact.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Currencies the pricing engine deals in.
///
/// KRW is the settlement currency; USD and EUR only appear as the
/// denomination of the foreign covered portion of long-term plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    KRW,
    USD,
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::KRW => "KRW",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// True for the currencies a foreign-currency plan may settle its
    /// covered portion in.
    pub fn is_foreign(&self) -> bool {
        !matches!(self, Currency::KRW)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when a currency code cannot be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown currency code: {0}")]
pub struct CurrencyParseError(pub String);

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KRW" => Ok(Currency::KRW),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            other => Err(CurrencyParseError(other.to_string())),
        }
    }
}

/// A percentage rate, stored as a percent value (e.g. 37.5 for 37.5%).
///
/// Short-term proration rates come out of the rate tables as percent
/// figures, so the wrapper keeps them in that form and only divides by 100
/// at application time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(Decimal);

impl Rate {
    /// The 100% rate applied to trips of a year or more and to trips past
    /// the end of the short-term table.
    pub const FULL_PERCENT: Decimal = dec!(100);

    /// Creates a rate from a percent figure (e.g. 37.5 for 37.5%)
    pub fn from_percent(percent: Decimal) -> Self {
        Self(percent)
    }

    /// The full annual rate (100%)
    pub fn full() -> Self {
        Self(Self::FULL_PERCENT)
    }

    /// Returns the rate as a percent figure
    pub fn as_percent(&self) -> Decimal {
        self.0
    }

    /// Applies the rate to an amount: `amount * percent / 100`
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Self::FULL_PERCENT
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Truncates a KRW amount to the nearest lower multiple of 10.
///
/// Every final premium goes through this step (e.g. 317,852.5 → 317,850);
/// intermediate figures such as the annual premium are never truncated.
pub fn floor_to_ten(amount: Decimal) -> Decimal {
    (amount / dec!(10)).floor() * dec!(10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_to_ten_truncates_downward() {
        assert_eq!(floor_to_ten(dec!(317852.5)), dec!(317850));
        assert_eq!(floor_to_ten(dec!(317859.99)), dec!(317850));
        assert_eq!(floor_to_ten(dec!(317850)), dec!(317850));
        assert_eq!(floor_to_ten(dec!(0)), dec!(0));
        assert_eq!(floor_to_ten(dec!(9.99)), dec!(0));
    }

    #[test]
    fn test_rate_apply() {
        let rate = Rate::from_percent(dec!(37.5));
        assert_eq!(rate.apply(dec!(100000)), dec!(37500));
        assert_eq!(Rate::full().apply(dec!(12345)), dec!(12345));
    }

    #[test]
    fn test_currency_round_trip() {
        for c in [Currency::KRW, Currency::USD, Currency::EUR] {
            assert_eq!(c.code().parse::<Currency>(), Ok(c));
        }
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_only_usd_and_eur_are_foreign() {
        assert!(!Currency::KRW.is_foreign());
        assert!(Currency::USD.is_foreign());
        assert!(Currency::EUR.is_foreign());
    }
}
