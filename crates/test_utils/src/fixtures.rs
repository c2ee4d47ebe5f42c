//! Seeded rate stores and request builders for the scenario tests
//!
//! The seed data is shared across the domain and API suites so scenario
//! expectations stay consistent: domestic "Standard Plan" age 30 male costs
//! 53,470 KRW annually, the domestic 7-day bracket is 25%, and so on.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::Currency;
use rust_decimal_macros::dec;

use domain_pricing::{CurrencyPlan, Gender, InsuranceType, PlanType, QuoteInput};

use crate::memory::InMemoryRateStore;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// June 1 → June 8 2024, a 7-day trip
pub fn june_week() -> (DateTime<Utc>, DateTime<Utc>) {
    (instant(2024, 6, 1), instant(2024, 6, 8))
}

/// A rate store covering every scenario in the test suites.
///
/// Domestic brackets top out at 180 days so trips beyond that exercise the
/// full-rate default. The study-abroad "Global Plan" age 30 male row exists
/// for USD only, exercising the EUR→USD fallback.
pub fn seeded_rate_store() -> InMemoryRateStore {
    InMemoryRateStore::new()
        // domestic travel, KRW path
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            "Standard Plan",
            30,
            Gender::Male,
            false,
            dec!(53470),
        )
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            "Standard Plan",
            30,
            Gender::Female,
            false,
            dec!(49820),
        )
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            "Standard Plan",
            45,
            Gender::Male,
            true,
            dec!(88400),
        )
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            PlanType::CHILDREN,
            10,
            Gender::Male,
            false,
            dec!(21160),
        )
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            PlanType::ECONOMY,
            30,
            Gender::Male,
            false,
            dec!(41200),
        )
        .with_premium_rate(
            InsuranceType::DomesticTravel,
            PlanType::ECONOMY,
            28,
            Gender::Female,
            false,
            dec!(39800),
        )
        .with_short_term_rate(InsuranceType::DomesticTravel, 3, dec!(15))
        .with_short_term_rate(InsuranceType::DomesticTravel, 7, dec!(25))
        .with_short_term_rate(InsuranceType::DomesticTravel, 15, dec!(35))
        .with_short_term_rate(InsuranceType::DomesticTravel, 31, dec!(45))
        .with_short_term_rate(InsuranceType::DomesticTravel, 93, dec!(60))
        .with_short_term_rate(InsuranceType::DomesticTravel, 180, dec!(80))
        // overseas travel, KRW path with plan surcharge
        .with_premium_rate(
            InsuranceType::OverseasTravel,
            "Premium Plan",
            30,
            Gender::Male,
            false,
            dec!(120000),
        )
        .with_short_term_rate(InsuranceType::OverseasTravel, 7, dec!(30))
        .with_short_term_rate(InsuranceType::OverseasTravel, 30, dec!(50))
        .with_short_term_rate(InsuranceType::OverseasTravel, 180, dec!(80))
        .with_dated_plan_additional_fee(
            InsuranceType::OverseasTravel,
            "Premium Plan",
            dec!(3000),
            Some(date(2023, 1, 1)),
            true,
        )
        .with_dated_plan_additional_fee(
            InsuranceType::OverseasTravel,
            "Premium Plan",
            dec!(5000),
            Some(date(2024, 1, 1)),
            true,
        )
        // study/language training, foreign-currency path
        .with_foreign_premium_rate(
            InsuranceType::StudyAbroad,
            "Global Plan",
            22,
            Gender::Female,
            false,
            Currency::USD,
            dec!(150000),
            dec!(120),
        )
        .with_foreign_premium_rate(
            InsuranceType::StudyAbroad,
            "Global Plan",
            22,
            Gender::Female,
            false,
            Currency::EUR,
            dec!(150000),
            dec!(110),
        )
        .with_foreign_premium_rate(
            InsuranceType::StudyAbroad,
            "Global Plan",
            30,
            Gender::Male,
            false,
            Currency::USD,
            dec!(140000),
            dec!(100),
        )
        .with_short_term_rate(InsuranceType::StudyAbroad, 93, dec!(55))
        .with_short_term_rate(InsuranceType::StudyAbroad, 180, dec!(75))
        // working holiday, forced-EUR plan
        .with_foreign_premium_rate(
            InsuranceType::WorkingHoliday,
            PlanType::WORKING_HOLIDAY_EURO,
            25,
            Gender::Male,
            false,
            Currency::EUR,
            dec!(100000),
            dec!(200),
        )
        // exchange rates: the 05-31 USD row supersedes the 05-30 one
        .with_exchange_rate(Currency::USD, dec!(1349.00), date(2024, 5, 30))
        .with_exchange_rate(Currency::USD, dec!(1350.50), date(2024, 5, 31))
        .with_exchange_rate(Currency::EUR, dec!(1480.25), date(2024, 5, 31))
}

/// Scenario A input: domestic, age 30 male, Standard Plan, 7-day June trip
pub fn standard_quote() -> QuoteInput {
    let (departure, arrival) = june_week();
    QuoteInput {
        insurance_type: InsuranceType::DomesticTravel,
        age: 30,
        gender: Gender::Male,
        plan_type: PlanType::new("Standard Plan"),
        has_medical_expense: false,
        departure,
        arrival,
        currency_plan: CurrencyPlan::Krw,
        destination_country: None,
    }
}
