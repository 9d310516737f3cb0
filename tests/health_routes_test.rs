// ABOUTME: Integration tests for health, readiness, API description, and fallback routes
// ABOUTME: Also checks request ID assignment and propagation through the middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use axum::http::{Method, StatusCode};
use chrono::DateTime;
use helpers::axum_test::AxumTestRequest;
use helpers::test_app;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_status_and_dual_time() {
    let body: Value = AxumTestRequest::get("/health")
        .send(test_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "smart-alarm-server");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptimeSeconds"].is_u64());

    let utc = body["time"]["utc"].as_str().unwrap();
    let ist = body["time"]["ist"].as_str().unwrap();
    assert!(utc.ends_with('Z'));
    assert!(ist.ends_with("+05:30"));
    assert_eq!(
        DateTime::parse_from_rfc3339(utc).unwrap(),
        DateTime::parse_from_rfc3339(ist).unwrap()
    );
}

#[tokio::test]
async fn test_ready_runs_generator_check() {
    let body: Value = AxumTestRequest::get("/ready")
        .send(test_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"][0]["name"], "sleep_pattern_generator");
    assert_eq!(body["checks"][0]["status"], "healthy");
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let body: Value = AxumTestRequest::get("/")
        .send(test_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["service"], "smart-alarm-server");
    let endpoints = body["endpoints"].as_array().unwrap();
    let alarm = endpoints
        .iter()
        .find(|e| e["path"] == "/alarm")
        .expect("alarm endpoint listed");
    assert_eq!(alarm["method"], "POST");
    assert!(alarm["example"]["soft"].is_string());
    assert!(endpoints.iter().any(|e| e["path"] == "/health"));
    assert_eq!(body["stageLabels"]["1"], "Deep Sleep");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let body: Value = AxumTestRequest::get("/snooze")
        .send(test_app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();

    assert_eq!(body["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Route GET /snooze not found");
}

#[tokio::test]
async fn test_wrong_method_on_alarm_is_rejected() {
    let response = AxumTestRequest::new(Method::GET, "/alarm").send(test_app()).await;
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let response = AxumTestRequest::get("/health").send(test_app()).await;
    let request_id = response.header("x-request-id").expect("request id header");
    assert!(request_id.starts_with("req_"));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "client-supplied-42")
        .send(test_app())
        .await;
    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("client-supplied-42")
    );
}
