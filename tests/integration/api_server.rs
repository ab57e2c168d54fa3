//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and risk evaluation.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "altscore-risk-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("http_requests_in_flight"),
        "Expected http_requests_in_flight metric"
    );
}

#[tokio::test]
async fn metrics_middleware_counts_requests() {
    let app = TestApiServer::new().await;
    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }
    assert_eq!(app.metrics.http_requests_total.get(), 3);
    assert_eq!(app.metrics.http_requests_in_flight.get(), 0.0);
}

#[tokio::test]
async fn evaluate_returns_subject_assessment_and_report() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/evaluate")
        .json(&json!({
            "name": "Austin Analytics",
            "headquarters": "Austin, TX",
            "industry": "Technology",
            "business_age": 15,
            "signals": [
                { "source": "Google News", "text": "Revenue beat expectations", "timestamp": "2024-04-01" },
                { "source": "Google News", "text": "Revenue beat expectations", "timestamp": "2024-04-02" },
                { "source": "Google News", "text": "Revenue beat expectations", "timestamp": "2024-04-03" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["assessment"]["decision"], "APPROVE");
    assert_eq!(body["subject"]["geo_risk_label"], "Neutral Zone");
    assert!(body["subject"]["signals"][0]["polarity"].as_f64().unwrap() > 0.0);
    assert_eq!(body["report"]["verified_cash"], Value::Null);
    assert_eq!(body["report"]["key_person"], "Unknown");
    assert!(body["report"]["risk_score"].as_f64().unwrap() > 50.0);
}

#[tokio::test]
async fn evaluate_applies_hard_stop() {
    let app = TestApiServer::with_polarity(0.9).await;
    let response = app
        .server
        .post("/api/evaluate")
        .json(&json!({
            "name": "Sinking Ship Co",
            "signals": [
                { "source": "Court", "text": "Federal investigation opened", "date": "garbage" },
                { "source": "News", "text": "Sales up", "date": "2024-01-05" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["assessment"]["decision"], "REJECT");
    assert_eq!(body["assessment"]["hard_stop_applied"], true);
    assert_eq!(body["subject"]["lawsuit_flag"], true);
    assert!(body["subject"]["risk_score"].as_f64().unwrap() <= 40.0);
    assert!(body["report"]["risk_factors"][0]
        .as_str()
        .unwrap()
        .starts_with("HARD STOP"));

    let metrics = app.server.get("/metrics").await.text();
    assert!(metrics.contains("risk_hard_stops_total 1"));
    assert!(metrics.contains("risk_evaluations_total{decision=\"REJECT\"} 1"));
}

#[tokio::test]
async fn evaluate_derives_age_from_founding_year() {
    let app = TestApiServer::with_polarity(0.0).await;
    let founded = Utc::now().year() - 1;
    let response = app
        .server
        .post("/api/evaluate")
        .json(&json!({
            "name": "Young Co",
            "founding_year": founded,
            "signals": [
                { "source": "News", "text": "Doors open downtown", "timestamp": "2024-06-01" }
            ]
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["subject"]["business_age"], 1);
    assert_eq!(body["assessment"]["risk_score"], 35.0);
    assert!(body["subject"]["decision_reasons"][0]
        .as_str()
        .unwrap()
        .contains("Early-stage"));
}

#[tokio::test]
async fn evaluate_rejects_invalid_subject() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/evaluate")
        .json(&json!({
            "name": "Bad Links",
            "related_entities": [{ "name": "Ghost LLC", "risk_score": 140.0 }]
        }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Ghost LLC"));
}

#[tokio::test]
async fn evaluate_rejects_blank_name() {
    let app = TestApiServer::new().await;
    let response = app
        .server
        .post("/api/evaluate")
        .json(&json!({ "name": "  " }))
        .expect_failure()
        .await;
    assert_eq!(response.status_code(), 422);
}
