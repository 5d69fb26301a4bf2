//! Integration tests for FuelEU API endpoints
//!
//! These run the full router against the in-memory store seeded with the
//! demo routes (R1, R2 for 2024; R3 for 2023, flagged baseline).

use axum::http::StatusCode;
use axum_test::TestServer;
use fueleu_api::{build_app, ApiConfig, AppState};
use fueleu_core::{BankingBasis, Route};
use fueleu_store::FuelEuDatabase;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

async fn create_test_state(config: ApiConfig) -> AppState {
    let database = FuelEuDatabase::in_memory();
    database.seed_demo().await.unwrap();
    AppState::with_config(config, database)
}

async fn create_test_server() -> TestServer {
    let state = create_test_state(ApiConfig::default()).await;
    TestServer::new(build_app(state)).unwrap()
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["components"].as_array().unwrap().len() >= 1);
}

#[tokio::test]
async fn test_health_reports_requests_served() {
    let server = create_test_server().await;

    server.get("/routes").await.assert_status_ok();
    let body: Value = server.get("/health").await.json();

    // The health request itself is counted before the handler runs
    assert_eq!(body["requests_served"], 2);
}

// ============ Route Endpoint Tests ============

#[tokio::test]
async fn test_list_routes() {
    let server = create_test_server().await;

    let response = server.get("/routes").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 3);
    assert_eq!(routes[0]["routeId"], "R1");
    assert_eq!(routes[0]["vesselType"], "Cargo");
    assert_eq!(routes[2]["isBaseline"], true);
}

#[tokio::test]
async fn test_list_routes_filtered() {
    let server = create_test_server().await;

    let response = server
        .get("/routes")
        .add_query_param("year", 2024)
        .add_query_param("fuelType", "lng")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let routes = body.as_array().unwrap();
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0]["routeId"], "R2");
}

#[tokio::test]
async fn test_set_baseline() {
    let server = create_test_server().await;

    let response = server.post("/routes/R1/baseline").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["updated"]["routeId"], "R1");
    assert_eq!(body["updated"]["isBaseline"], true);

    let routes: Value = server.get("/routes").await.json();
    let flagged: Vec<&Value> = routes
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["isBaseline"] == true)
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["routeId"], "R1");
}

#[tokio::test]
async fn test_set_baseline_encoded_route_id() {
    let database = FuelEuDatabase::in_memory();
    database
        .seed(vec![Route::new("A/B?x#y", 2024).with_ghg_intensity(dec!(80))])
        .await
        .unwrap();
    let server = TestServer::new(build_app(AppState::new(database))).unwrap();

    let response = server.post("/routes/A%2FB%3Fx%23y/baseline").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["updated"]["routeId"], "A/B?x#y");
}

#[tokio::test]
async fn test_set_baseline_unknown_route() {
    let server = create_test_server().await;

    let response = server.post("/routes/R9/baseline").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_comparison() {
    let server = create_test_server().await;

    let response = server.get("/routes/comparison").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["baseline"]["routeId"], "R3");
    let comparison = body["comparison"].as_array().unwrap();
    assert_eq!(comparison.len(), 2);

    let r1 = comparison.iter().find(|c| c["routeId"] == "R1").unwrap();
    // ((75.4 - 50.2) / 50.2) * 100
    assert!((number(&r1["percentDiff"]) - 50.20).abs() < 1e-9);
    assert_eq!(r1["compliant"], false);
}

#[tokio::test]
async fn test_comparison_against_zero_intensity_baseline() {
    let database = FuelEuDatabase::in_memory();
    database
        .seed(vec![
            Route::new("Z", 2024).as_baseline(),
            Route::new("R1", 2024),
        ])
        .await
        .unwrap();
    let server = TestServer::new(build_app(AppState::new(database))).unwrap();

    let response = server.get("/routes/comparison").await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATE");
}

// ============ Compliance Endpoint Tests ============

#[tokio::test]
async fn test_compliance_cb() {
    let server = create_test_server().await;

    let response = server
        .get("/compliance/cb")
        .add_query_param("routeId", "R2")
        .add_query_param("year", 2024)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["routeId"], "R2");
    assert_eq!(body["year"], 2024);
    // (50.2 - 62.1) * 600.8
    assert!((number(&body["cbGco2eq"]) - (-7149.52)).abs() < 1e-9);
    assert_eq!(body["compliant"], "No");
    assert_eq!(body["baselineYear"], 2023);
}

#[tokio::test]
async fn test_adjusted_cb() {
    let server = create_test_server().await;
    server.post("/routes/R1/baseline").await.assert_status_ok();

    let response = server
        .get("/compliance/adjusted-cb")
        .add_query_param("routeId", "R2")
        .add_query_param("year", 2024)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // (75.4 - 62.1) * 600.8 = 7990.64; * 0.95 = 7591.108
    assert!((number(&body["cbGco2eq"]) - 7990.64).abs() < 1e-9);
    assert!((number(&body["adjustedCb"]) - 7591.11).abs() < 1e-9);
    assert_eq!(body["compliant"], "Yes");
    assert_eq!(body["baselineYear"], 2024);
}

#[tokio::test]
async fn test_compliance_cb_missing_year() {
    let server = create_test_server().await;

    let response = server
        .get("/compliance/cb")
        .add_query_param("routeId", "R2")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_compliance_cb_unknown_route_year() {
    let server = create_test_server().await;

    let response = server
        .get("/compliance/cb")
        .add_query_param("routeId", "R1")
        .add_query_param("year", 2023)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

// ============ Banking Endpoint Tests ============

#[tokio::test]
async fn test_banked_starts_at_zero() {
    let server = create_test_server().await;

    let response = server.get("/banking/banked").add_query_param("routeId", "R2").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["routeId"], "R2");
    assert_eq!(number(&body["amount"]), 0.0);
}

#[tokio::test]
async fn test_banked_requires_route_id() {
    let server = create_test_server().await;

    let response = server.get("/banking/banked").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bank_apply_round_trip() {
    let server = create_test_server().await;

    let response = server
        .post("/banking/bank")
        .json(&json!({ "routeId": "R2", "year": 2024 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "CB banked successfully");
    let banked = number(&body["entry"]["credit"]);
    assert!(banked > 0.0);

    let response = server
        .post("/banking/apply")
        .json(&json!({ "routeId": "R2", "amount": 1000 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(number(&body["entry"]["debit"]), 1000.0);

    let records: Value = server
        .get("/banking/records")
        .add_query_param("routeId", "R2")
        .await
        .json();
    assert_eq!(records["records"].as_array().unwrap().len(), 2);
    assert!((number(&records["balance"]) - (banked - 1000.0)).abs() < 1e-3);
}

#[tokio::test]
async fn test_apply_exact_banked_amount() {
    let database = FuelEuDatabase::in_memory();
    database
        .seed(vec![Route::new("X", 2024)
            .with_ghg_intensity(dec!(62.1234))
            .with_fuel_consumption(dec!(900.34571937))])
        .await
        .unwrap();
    let server = TestServer::new(build_app(AppState::new(database))).unwrap();

    server
        .post("/banking/bank")
        .json(&json!({ "routeId": "X", "year": 2024 }))
        .await
        .assert_status_ok();

    let banked: Value = server
        .get("/banking/banked")
        .add_query_param("routeId", "X")
        .await
        .json();
    let amount = banked["amount"].clone();
    let wire: Decimal = amount.to_string().parse().unwrap();
    assert_eq!(wire, dec!(1004560196.179645878));

    let response = server
        .post("/banking/apply")
        .json(&json!({ "routeId": "X", "amount": amount }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(number(&body["entry"]["balance"]), 0.0);

    let banked: Value = server
        .get("/banking/banked")
        .add_query_param("routeId", "X")
        .await
        .json();
    assert_eq!(number(&banked["amount"]), 0.0);
}

#[tokio::test]
async fn test_bank_overflow_is_conflict() {
    let database = FuelEuDatabase::in_memory();
    database
        .seed(vec![Route::new("BIG", 2024)
            .with_ghg_intensity(dec!(62.1))
            .with_fuel_consumption(dec!(10000000000000000000000000))])
        .await
        .unwrap();
    let server = TestServer::new(build_app(AppState::new(database))).unwrap();

    let response = server
        .post("/banking/bank")
        .json(&json!({ "routeId": "BIG", "year": 2024 }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_apply_insufficient_balance() {
    let server = create_test_server().await;

    let response = server
        .post("/banking/apply")
        .json(&json!({ "routeId": "R1", "amount": 50 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INSUFFICIENT_BALANCE");

    let records: Value = server
        .get("/banking/records")
        .add_query_param("routeId", "R1")
        .await
        .json();
    assert!(records["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_apply_non_positive_amount() {
    let server = create_test_server().await;

    let response = server
        .post("/banking/apply")
        .json(&json!({ "routeId": "R1", "amount": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_apply_malformed_body() {
    let server = create_test_server().await;

    let response = server
        .post("/banking/apply")
        .json(&json!({ "routeId": "R1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_bank_deficit_baseline_relative() {
    let config = ApiConfig {
        banking_basis: BankingBasis::BaselineRelative,
        ..Default::default()
    };
    let server = TestServer::new(build_app(create_test_state(config).await)).unwrap();

    let response = server
        .post("/banking/bank")
        .json(&json!({ "routeId": "R1", "year": 2024 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_OPERATION");
}

#[tokio::test]
async fn test_reset_bank_records() {
    let server = create_test_server().await;
    server
        .post("/banking/bank")
        .json(&json!({ "routeId": "R1", "year": 2024 }))
        .await
        .assert_status_ok();

    let response = server.delete("/banking/records").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["removed"], 1);

    let banked: Value = server
        .get("/banking/banked")
        .add_query_param("routeId", "R1")
        .await
        .json();
    assert_eq!(number(&banked["amount"]), 0.0);
}

// ============ Pooling Endpoint Tests ============

#[tokio::test]
async fn test_create_pool() {
    let server = create_test_server().await;

    let response = server
        .post("/pooling")
        .json(&json!({ "year": 2024, "members": [{ "routeId": "R1" }, { "routeId": "R2" }] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Pool created successfully");
    assert_eq!(body["year"], 2024);
    // 111522.2736 + 163638.6944
    assert!((number(&body["totalCb"]) - 275160.97).abs() < 1e-9);

    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    for member in members {
        assert_eq!(member["cbBefore"], member["cbAfter"]);
    }

    let pools: Value = server.get("/pooling").add_query_param("year", 2024).await.json();
    assert_eq!(pools.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_pool_too_few_members() {
    let server = create_test_server().await;

    let response = server
        .post("/pooling")
        .json(&json!({ "year": 2024, "members": [{ "routeId": "R1" }] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_ARGUMENT");
}

// ============ Versioned Prefix Tests ============

#[tokio::test]
async fn test_v1_prefix() {
    let server = create_test_server().await;

    let response = server.get("/api/v1/routes/comparison").await;

    response.assert_status_ok();
}
