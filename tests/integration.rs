//! Integration tests for the payroll engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Gross-for-take-home solves with and without tax
//! - Zero and tiny targets
//! - Request validation and malformed JSON
//! - Monthly payroll validation, summaries and period totals
//! - Duplicate employees
//! - Configuration loading

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::calculate_deductions;
use payroll_engine::config::{ConfigLoader, PayrollSettings};
use payroll_engine::error::EngineError;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_config() -> ConfigLoader {
    ConfigLoader::load("./config/rwanda").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(create_test_config()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal field that was serialized as a string.
fn field(json: &Value, name: &str) -> Decimal {
    let raw = json[name]
        .as_str()
        .unwrap_or_else(|| panic!("field '{}' missing or not a string: {}", name, json));
    decimal(raw)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn solve(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/gross-for-take-home", body).await
}

async fn validate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/payroll/validate", body).await
}

fn row(employee: &str, employee_type: &str, take_home: i64, apply_tax: bool) -> Value {
    json!({
        "employee": employee,
        "employee_type": employee_type,
        "take_home": take_home,
        "apply_tax": apply_tax
    })
}

// =============================================================================
// Gross-for-take-home
// =============================================================================

#[tokio::test]
async fn test_solve_100000_with_tax() {
    let (status, json) = solve(json!({ "take_home": 100000 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&json, "gross_pay"), decimal("129805"));
    assert_eq!(field(&json, "paye"), decimal("9961"));
    assert_eq!(field(&json, "rssb_employer"), decimal("10384"));
    assert_eq!(field(&json, "rssb_employee"), decimal("7788"));
    assert_eq!(field(&json, "maternity_employer"), decimal("779"));
    assert_eq!(field(&json, "maternity_employee"), decimal("389"));
    assert_eq!(field(&json, "net_salary"), decimal("100503"));
    assert_eq!(field(&json, "cbhi"), decimal("503"));
    assert_eq!(field(&json, "take_home_2"), decimal("100001"));
}

#[tokio::test]
async fn test_solved_gross_is_minimal() {
    let schedule = create_test_config().schedule().clone();

    for target in [1i64, 42337, 50000, 60000, 100000, 500000] {
        let (status, json) = solve(json!({ "take_home": target })).await;
        assert_eq!(status, StatusCode::OK);

        let target = Decimal::from(target);
        let gross = field(&json, "gross_pay");
        assert!(calculate_deductions(gross, true, &schedule).take_home_2 >= target);
        assert!(calculate_deductions(gross - Decimal::ONE, true, &schedule).take_home_2 < target);
    }
}

#[tokio::test]
async fn test_known_solutions() {
    let cases = [
        (1, "2"),
        (42337, "50000"),
        (50000, "59050"),
        (60000, "72306"),
        (500000, "846666"),
    ];
    for (target, expected) in cases {
        let (_, json) = solve(json!({ "take_home": target })).await;
        assert_eq!(
            field(&json, "gross_pay"),
            decimal(expected),
            "gross for take-home {}",
            target
        );
    }
}

#[tokio::test]
async fn test_solve_without_tax() {
    let (status, json) = solve(json!({ "take_home": "100000", "apply_tax": false })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&json, "gross_pay"), decimal("118100"));
    assert_eq!(field(&json, "paye"), Decimal::ZERO);
    assert!(field(&json, "take_home_2") >= decimal("100000"));
}

#[tokio::test]
async fn test_zero_target_returns_zeroes() {
    for apply_tax in [true, false] {
        let (status, json) = solve(json!({ "take_home": 0, "apply_tax": apply_tax })).await;

        assert_eq!(status, StatusCode::OK);
        for name in [
            "gross_pay",
            "paye",
            "rssb_employer",
            "rssb_employee",
            "maternity_employer",
            "maternity_employee",
            "net_salary",
            "cbhi",
            "take_home_2",
        ] {
            assert_eq!(field(&json, name), Decimal::ZERO, "{}", name);
        }
    }
}

#[tokio::test]
async fn test_custom_tolerance_gives_same_gross() {
    let (_, coarse) = solve(json!({ "take_home": 100000, "tolerance": 500, "max_iterations": 5 })).await;
    let (_, fine) = solve(json!({ "take_home": 100000, "tolerance": "0.001", "max_iterations": 200 })).await;

    assert_eq!(field(&coarse, "gross_pay"), decimal("129805"));
    assert_eq!(field(&fine, "gross_pay"), decimal("129805"));
}

// =============================================================================
// Request validation
// =============================================================================

#[tokio::test]
async fn test_missing_take_home() {
    let (status, json) = solve(json!({ "apply_tax": true })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_solver_limits() {
    let (status, json) = solve(json!({ "take_home": 1000, "max_iterations": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = solve(json!({ "take_home": 1000, "tolerance": "-0.5" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_iteration_cap_enforced() {
    let (status, json) = solve(json!({
        "take_home": 7,
        "tolerance": 0,
        "max_iterations": 4294967295u64
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = solve(json!({ "take_home": 7, "tolerance": 0, "max_iterations": 200 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&json, "gross_pay"), decimal("9"));
}

#[tokio::test]
async fn test_take_home_ceiling_enforced() {
    let (status, json) = solve(json!({ "take_home": "40000000000000000000000000000" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = validate(json!({
        "rows": [row("EMP-0001", "Academic", 2_000_000_000_000, true)]
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_wrong_type_is_malformed() {
    let (status, json) = solve(json!({ "take_home": 1000, "apply_tax": "yes" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_invalid_json_syntax() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/validate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"rows\": ["))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

// =============================================================================
// Monthly payroll validation
// =============================================================================

#[tokio::test]
async fn test_payroll_rows_are_priced() {
    let (status, json) = validate(json!({
        "company": "Green Hills Academy",
        "month": "March",
        "year": 2025,
        "rows": [
            row("EMP-0001", "Academic", 100000, true),
            row("EMP-0002", "Support", 80000, false),
            { "employee": "EMP-0003", "employee_type": "Administrative", "apply_tax": true }
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["company"], "Green Hills Academy");
    assert_eq!(json["year"], 2025);

    let rows = json["rows"].as_array().unwrap();
    assert_eq!(field(&rows[0], "gross_pay"), decimal("129805"));

    assert_eq!(field(&rows[1], "gross_pay"), decimal("80000"));
    assert_eq!(field(&rows[1], "net_salary"), decimal("80000"));
    assert_eq!(field(&rows[1], "take_home_2"), decimal("80000"));
    assert_eq!(field(&rows[1], "paye"), Decimal::ZERO);

    assert_eq!(field(&rows[2], "gross_pay"), Decimal::ZERO);
    assert_eq!(field(&rows[2], "take_home_2"), Decimal::ZERO);

    let steps = json["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps[0]["rule_id"], "row_solve");
    assert_eq!(steps[1]["rule_id"], "row_tax_exempt");
    assert_eq!(steps[2]["rule_id"], "row_no_target");
}

#[tokio::test]
async fn test_unknown_category_counts_in_totals_only() {
    let (status, json) = validate(json!({
        "rows": [
            row("EMP-0001", "Academic", 100000, true),
            row("EMP-0002", "Administrative", 42337, true),
            row("EMP-0003", "Support", 80000, false),
            row("EMP-0004", "Kitchen", 50000, true)
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::OK);

    let summary = json["summary_by_type"].as_array().unwrap();
    assert_eq!(summary.len(), 4);
    assert_eq!(summary[0]["employee_type"], "Academic");
    assert_eq!(summary[1]["employee_type"], "Administrative");
    assert_eq!(summary[2]["employee_type"], "Support");
    assert_eq!(summary[3]["employee_type"], "Total");
    assert_eq!(summary[3]["employee_count"], 3);
    assert_eq!(field(&summary[3], "advance_pay"), decimal("222337"));

    let totals = &json["totals"];
    assert_eq!(field(totals, "advance_pay"), decimal("272337"));
    assert_eq!(
        field(totals, "total_cost"),
        decimal("129805") + decimal("50000") + decimal("80000") + decimal("59050")
    );
    assert_eq!(
        field(totals, "net_minus_advance"),
        field(totals, "net_salary") - field(totals, "advance_pay")
    );

    let warnings = json["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "UNKNOWN_CATEGORY");
}

#[tokio::test]
async fn test_total_summary_is_sum_of_categories() {
    let (_, json) = validate(json!({
        "rows": [
            row("EMP-0001", "Academic", 100000, true),
            row("EMP-0002", "Academic", 250000, true),
            row("EMP-0003", "Administrative", 60000, true),
            row("EMP-0004", "Support", 35000, false)
        ]
    }))
    .await;

    let summary = json["summary_by_type"].as_array().unwrap();
    let (categories, total) = summary.split_at(3);
    let total = &total[0];

    for name in ["advance_pay", "net_salary", "net_minus_advance", "cost_to_company"] {
        let summed: Decimal = categories.iter().map(|c| field(c, name)).sum();
        assert_eq!(field(total, name), summed, "{}", name);
    }
    assert_eq!(summary[0]["employee_count"], 2);
}

#[tokio::test]
async fn test_resubmitting_priced_rows_is_idempotent() {
    let body = json!({
        "rows": [
            row("EMP-0001", "Academic", 100000, true),
            row("EMP-0002", "Support", 80000, false)
        ]
    });
    let (_, first) = validate(body).await;
    let (_, second) = validate(json!({ "rows": first["rows"].clone() })).await;

    assert_eq!(first["rows"], second["rows"]);
    assert_eq!(first["summary_by_type"], second["summary_by_type"]);
    assert_eq!(first["totals"], second["totals"]);
}

#[tokio::test]
async fn test_duplicate_employee_rejected() {
    let (status, json) = validate(json!({
        "rows": [
            row("EMP-0001", "Academic", 100000, true),
            row("EMP-0001", "Support", 80000, false)
        ]
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "DUPLICATE_EMPLOYEE");
    assert!(json["message"].as_str().unwrap().contains("EMP-0001"));
}

#[tokio::test]
async fn test_empty_payroll() {
    let (status, json) = validate(json!({ "rows": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary_by_type"].as_array().unwrap().len(), 4);
    assert_eq!(field(&json["totals"], "total_cost"), Decimal::ZERO);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_shipped_configuration_matches_built_in_schedule() {
    let config = create_test_config();

    assert_eq!(config.schedule().metadata.code, "RW-PAYE-MONTHLY");
    assert_eq!(config.schedule().tax.brackets.len(), 4);
    assert_eq!(
        config.categories(),
        ["Academic", "Administrative", "Support"]
    );
    assert_eq!(
        calculate_deductions(decimal("150000"), true, config.schedule()).paye,
        decimal("14000")
    );
}

#[test]
fn test_schedule_with_tax_jump_rejected() {
    let mut schedule = create_test_config().schedule().clone();
    schedule.tax.brackets[1].base_amount = decimal("20000");

    let result = ConfigLoader::from_parts(schedule, PayrollSettings::default());
    assert!(matches!(result, Err(EngineError::InvalidSchedule { .. })));
}

#[test]
fn test_missing_config_directory() {
    let result = ConfigLoader::load("./config/does-not-exist");
    assert!(result.is_err());
}
