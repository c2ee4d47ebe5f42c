//! HTTP-level tests: status mapping and response shapes
//!
//! Runs the real router against the in-memory rate store, so these cover
//! the full request path short of PostgreSQL. Decimal fields serialize as
//! JSON strings.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{json, Value};

use interface_api::create_router;
use test_utils::{seeded_rate_store, InMemoryRateStore};

fn server() -> TestServer {
    TestServer::new(create_router(Arc::new(seeded_rate_store()))).expect("router builds")
}

fn empty_server() -> TestServer {
    TestServer::new(create_router(Arc::new(InMemoryRateStore::new()))).expect("router builds")
}

fn standard_request() -> Value {
    json!({
        "insurance_type": "domestic travel insurance",
        "age": 30,
        "gender": "M",
        "plan_type": "Standard Plan",
        "has_medical_expense": false,
        "departure_date": "2024-06-01T00:00:00Z",
        "arrival_date": "2024-06-08T00:00:00Z"
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let server = server();
    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn calculate_premium_returns_quote() {
    let server = server();
    let response = server
        .post("/api/travel/calculate-premium")
        .json(&standard_request())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["premium"], "13360");
    assert_eq!(body["annual_premium"], "53470");
    assert_eq!(body["short_term_rate"], "25");
    assert_eq!(body["period_days"], 7);
    // KRW path: no settlement currency in the response
    assert!(body.get("currency").is_none());
}

#[tokio::test]
async fn bare_dates_parse_as_midnight_utc() {
    let server = server();
    let mut request = standard_request();
    request["departure_date"] = json!("2024-06-01");
    request["arrival_date"] = json!("2024-06-08");

    let response = server
        .post("/api/travel/calculate-premium")
        .json(&request)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["premium"], "13360");
    assert_eq!(body["period_days"], 7);
}

#[tokio::test]
async fn missing_field_is_a_400_naming_the_field() {
    let server = server();
    let mut request = standard_request();
    request.as_object_mut().unwrap().remove("age");

    let response = server
        .post("/api/travel/calculate-premium")
        .json(&request)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "missing required field: age");
}

#[tokio::test]
async fn inverted_trip_window_is_a_400() {
    let server = server();
    let mut request = standard_request();
    request["departure_date"] = json!("2024-06-08T00:00:00Z");
    request["arrival_date"] = json!("2024-06-01T00:00:00Z");

    let response = server
        .post("/api/travel/calculate-premium")
        .json(&request)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "arrival must be after departure");
}

#[tokio::test]
async fn unparseable_date_is_a_400_naming_the_field() {
    let server = server();
    let mut request = standard_request();
    request["arrival_date"] = json!("June 8th");

    let response = server
        .post("/api/travel/calculate-premium")
        .json(&request)
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("arrival_date:"));
}

#[tokio::test]
async fn missing_rate_row_is_a_404() {
    let server = server();
    let mut request = standard_request();
    request["age"] = json!(99);

    let response = server
        .post("/api/travel/calculate-premium")
        .json(&request)
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("age=99"));
}

#[tokio::test]
async fn foreign_currency_quote_reports_settlement_currency() {
    let server = server();
    let response = server
        .post("/api/travel/calculate-premium")
        .json(&json!({
            "insurance_type": "study/language training",
            "age": 22,
            "gender": "F",
            "plan_type": "Global Plan",
            "departure_date": "2024-06-01T00:00:00Z",
            "arrival_date": "2024-11-28T00:00:00Z",
            "currency_plan": "foreign_currency",
            "travel_country": "Germany"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["currency"], "EUR");
    // 150000 + 110 * 1480.25 = 312827.50, prorated at 75% and floored
    assert_eq!(body["annual_premium"], "312827.50");
    assert_eq!(body["premium"], "234620");
}

#[tokio::test]
async fn group_premium_sums_individually_rounded_participants() {
    let server = server();
    let response = server
        .post("/api/travel/calculate-group-premium")
        .json(&json!({
            "insurance_type": "domestic travel insurance",
            "departure_date": "2024-06-01T00:00:00Z",
            "arrival_date": "2024-06-08T00:00:00Z",
            "insured_persons": [
                {"age": 30, "gender": "M", "plan_type": "Standard Plan"},
                {"age": 30, "gender": "F", "plan_type": "Standard Plan"},
                {"age": 10, "gender": "M", "plan_type": "Standard Plan"}
            ]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["total_premium"], "31100");
    assert_eq!(body["period_days"], 7);

    let persons = body["insured_persons"].as_array().unwrap();
    assert_eq!(persons.len(), 3);
    assert_eq!(persons[0]["premium"], "13360");
    assert_eq!(persons[1]["premium"], "12450");
    assert_eq!(persons[2]["premium"], "5290");
    // the ten-year-old was moved onto the children's plan
    assert_eq!(persons[2]["plan_type"], "Children's Plan");
}

#[tokio::test]
async fn group_failure_names_the_participant() {
    let server = server();
    let response = server
        .post("/api/travel/calculate-group-premium")
        .json(&json!({
            "insurance_type": "domestic travel insurance",
            "departure_date": "2024-06-01T00:00:00Z",
            "arrival_date": "2024-06-08T00:00:00Z",
            "insured_persons": [
                {"age": 30, "gender": "M", "plan_type": "Standard Plan"},
                {"age": 99, "gender": "M", "plan_type": "Standard Plan"}
            ]
        }))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("participant 2:"));
    assert!(message.contains("age=99"));
}

#[tokio::test]
async fn empty_group_is_a_400() {
    let server = server();
    let response = server
        .post("/api/travel/calculate-group-premium")
        .json(&json!({
            "insurance_type": "domestic travel insurance",
            "departure_date": "2024-06-01T00:00:00Z",
            "arrival_date": "2024-06-08T00:00:00Z",
            "insured_persons": []
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["message"], "at least one insured person is required");
}

#[tokio::test]
async fn exchange_rate_returns_latest_active_row() {
    let server = server();
    let response = server
        .get("/api/travel/exchange-rate")
        .add_query_param("currency", "USD")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["currency"], "USD");
    // no row dated yesterday exists, so the latest active row applies
    assert_eq!(body["exchange_rate"], "1350.50");
    assert_eq!(body["rate_date"], "2024-05-31");
}

#[tokio::test]
async fn exchange_rate_rejects_unknown_and_domestic_currencies() {
    let server = server();

    let response = server
        .get("/api/travel/exchange-rate")
        .add_query_param("currency", "GBP")
        .await;
    response.assert_status_bad_request();

    let response = server
        .get("/api/travel/exchange-rate")
        .add_query_param("currency", "KRW")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn exchange_rate_without_rows_is_a_404() {
    let server = empty_server();
    let response = server
        .get("/api/travel/exchange-rate")
        .add_query_param("currency", "EUR")
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("EUR"));
}

#[tokio::test]
async fn exchange_rate_without_currency_param_is_a_400() {
    let server = server();
    let response = server.get("/api/travel/exchange-rate").await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["message"], "missing required field: currency");
}
