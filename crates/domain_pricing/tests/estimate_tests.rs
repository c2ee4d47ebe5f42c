//! Estimate-quote pricing tests

use std::sync::Arc;

use rust_decimal_macros::dec;

use domain_pricing::{EstimateParticipant, EstimateService, Gender, InsuranceType, PlanType};
use test_utils::{date, june_week, seeded_rate_store, InMemoryRateStore};

fn service() -> EstimateService {
    EstimateService::new(Arc::new(seeded_rate_store()))
}

fn estimate_participant(sequence: u32, gender: Gender, birth_date: &str) -> EstimateParticipant {
    EstimateParticipant {
        sequence,
        gender,
        birth_date: birth_date.to_string(),
    }
}

#[tokio::test]
async fn splits_plans_by_age_and_totals_premiums() {
    let (departure, arrival) = june_week();
    let today = date(2024, 6, 20);
    let participants = vec![
        // age 28: Economy Plan row 39,800 x 25% = 9,950
        estimate_participant(1, Gender::Female, "19960615"),
        // age 10: Children's Plan row 21,160 x 25% = 5,290
        estimate_participant(2, Gender::Male, "20140101"),
    ];

    let quote = service()
        .quote_participants(
            InsuranceType::DomesticTravel,
            departure,
            arrival,
            &participants,
            today,
        )
        .await
        .unwrap();

    assert_eq!(quote.period_days, 7);
    assert_eq!(quote.lines.len(), 2);

    assert_eq!(quote.lines[0].age, 28);
    assert_eq!(quote.lines[0].plan_type, PlanType::economy());
    assert_eq!(quote.lines[0].premium, dec!(9950));

    assert_eq!(quote.lines[1].age, 10);
    assert_eq!(quote.lines[1].plan_type, PlanType::children());
    assert_eq!(quote.lines[1].premium, dec!(5290));

    assert_eq!(quote.total_premium, dec!(15240));
}

/// A participant with no matching rate row is listed at zero rather than
/// failing the whole estimate.
#[tokio::test]
async fn missing_rate_lists_zero_premium() {
    let (departure, arrival) = june_week();
    let today = date(2024, 6, 20);
    let participants = vec![
        estimate_participant(1, Gender::Female, "19960615"),
        // age 44: no Economy Plan row seeded
        estimate_participant(2, Gender::Male, "19800101"),
    ];

    let quote = service()
        .quote_participants(
            InsuranceType::DomesticTravel,
            departure,
            arrival,
            &participants,
            today,
        )
        .await
        .unwrap();

    assert_eq!(quote.lines[1].premium, dec!(0));
    assert_eq!(quote.total_premium, dec!(9950));
}

/// Estimates prorate the annual premium only; a registered plan surcharge
/// must not leak into an overseas estimate line.
#[tokio::test]
async fn overseas_estimate_excludes_plan_surcharge() {
    let store = InMemoryRateStore::new()
        .with_premium_rate(
            InsuranceType::OverseasTravel,
            PlanType::ECONOMY,
            30,
            Gender::Male,
            false,
            dec!(100000),
        )
        .with_short_term_rate(InsuranceType::OverseasTravel, 7, dec!(30))
        .with_plan_additional_fee(InsuranceType::OverseasTravel, PlanType::ECONOMY, dec!(5000));

    let (departure, arrival) = june_week();
    let participants = vec![estimate_participant(1, Gender::Male, "19940101")];

    let quote = EstimateService::new(Arc::new(store))
        .quote_participants(
            InsuranceType::OverseasTravel,
            departure,
            arrival,
            &participants,
            date(2024, 6, 20),
        )
        .await
        .unwrap();

    // 100,000 x 30% = 30,000; the 5,000 surcharge stays out
    assert_eq!(quote.lines[0].premium, dec!(30000));
    assert_eq!(quote.total_premium, dec!(30000));
}

#[tokio::test]
async fn malformed_birth_date_fails_validation() {
    let (departure, arrival) = june_week();
    let participants = vec![estimate_participant(1, Gender::Male, "not-a-date")];

    let err = service()
        .quote_participants(
            InsuranceType::DomesticTravel,
            departure,
            arrival,
            &participants,
            date(2024, 6, 20),
        )
        .await
        .unwrap_err();

    assert!(err.is_validation());
}

#[tokio::test]
async fn empty_participants_fails_validation() {
    let (departure, arrival) = june_week();

    let err = service()
        .quote_participants(
            InsuranceType::DomesticTravel,
            departure,
            arrival,
            &[],
            date(2024, 6, 20),
        )
        .await
        .unwrap_err();

    assert!(err.is_validation());
}
