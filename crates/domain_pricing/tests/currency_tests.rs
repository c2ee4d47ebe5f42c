//! Currency resolution and exchange-rate freshness tests

use chrono::NaiveDate;
use core_kernel::Currency;
use rust_decimal_macros::dec;

use domain_pricing::{
    display_exchange_rate, resolve_currency, Gender, InsuranceType, PlanType, PremiumRateKey,
    RateRepository,
};
use test_utils::{date, seeded_rate_store, InMemoryRateStore};

fn study_key(age: u32, gender: Gender) -> PremiumRateKey {
    PremiumRateKey {
        insurance_type: InsuranceType::StudyAbroad,
        plan_type: PlanType::new("Global Plan"),
        age,
        gender,
        has_medical_expense: false,
    }
}

mod resolution {
    use super::*;

    #[tokio::test]
    async fn euro_plan_forces_eur_even_without_rate_data() {
        let store = InMemoryRateStore::new(); // deliberately empty
        let key = PremiumRateKey {
            insurance_type: InsuranceType::WorkingHoliday,
            plan_type: PlanType::new(PlanType::WORKING_HOLIDAY_EURO),
            age: 25,
            gender: Gender::Male,
            has_medical_expense: false,
        };

        let resolved = resolve_currency(&store, &key, Some("Australia")).await.unwrap();
        assert_eq!(resolved.currency, Currency::EUR);
        assert!(resolved.forced);
    }

    #[tokio::test]
    async fn eurozone_destination_with_eur_row_resolves_eur() {
        let store = seeded_rate_store();

        let resolved = resolve_currency(&store, &study_key(22, Gender::Female), Some("France"))
            .await
            .unwrap();
        assert_eq!(resolved.currency, Currency::EUR);
        assert!(!resolved.forced);
    }

    #[tokio::test]
    async fn eurozone_destination_without_eur_row_resolves_usd() {
        let store = seeded_rate_store();

        // age 30 male has a USD row only
        let resolved = resolve_currency(&store, &study_key(30, Gender::Male), Some("France"))
            .await
            .unwrap();
        assert_eq!(resolved.currency, Currency::USD);
        assert!(!resolved.forced);
    }

    #[tokio::test]
    async fn non_eurozone_destination_resolves_usd() {
        let store = seeded_rate_store();

        let resolved = resolve_currency(&store, &study_key(22, Gender::Female), Some("Japan"))
            .await
            .unwrap();
        assert_eq!(resolved.currency, Currency::USD);
    }

    #[tokio::test]
    async fn missing_destination_resolves_usd() {
        let store = seeded_rate_store();

        let resolved = resolve_currency(&store, &study_key(22, Gender::Female), None)
            .await
            .unwrap();
        assert_eq!(resolved.currency, Currency::USD);
    }
}

mod freshness {
    use super::*;

    /// Display prefers yesterday's rate even when a newer row exists.
    #[tokio::test]
    async fn display_prefers_yesterdays_rate() {
        let store = seeded_rate_store(); // USD rows on 05-30 and 05-31

        let quote = display_exchange_rate(&store, Currency::USD, date(2024, 5, 31))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(quote.rate, dec!(1349.00));
        assert_eq!(quote.rate_date, date(2024, 5, 30));
    }

    #[tokio::test]
    async fn display_falls_back_to_latest_when_yesterday_missing() {
        let store = seeded_rate_store();

        let quote = display_exchange_rate(&store, Currency::USD, date(2024, 6, 10))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(quote.rate, dec!(1350.50));
        assert_eq!(quote.rate_date, date(2024, 5, 31));
    }

    #[tokio::test]
    async fn display_none_when_no_rows_at_all() {
        let store = InMemoryRateStore::new();

        let quote = display_exchange_rate(&store, Currency::EUR, date(2024, 6, 10))
            .await
            .unwrap();
        assert!(quote.is_none());
    }

    /// Pricing ignores dates entirely: the latest active row wins, with
    /// ties on rate_date broken by highest id.
    #[tokio::test]
    async fn pricing_takes_globally_latest_rate() {
        let same_day = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let store = InMemoryRateStore::new()
            .with_exchange_rate(Currency::USD, dec!(1350.00), same_day)
            .with_exchange_rate(Currency::USD, dec!(1352.00), same_day)
            .with_exchange_rate(Currency::USD, dec!(1340.00), date(2024, 5, 1));

        let quote = store.latest_exchange_rate(Currency::USD).await.unwrap().unwrap();
        assert_eq!(quote.rate, dec!(1352.00));
    }
}
