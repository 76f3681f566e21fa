//! Integration tests for the ingestion endpoint, end to end through
//! the HTTP layer, the pipeline, the store, and the WebSocket hub.

mod common;

use std::sync::Arc;

use axum::extract::ws::Message;
use axum::http::StatusCode;
use common::{body_json, post_json, FailingModel, StubModel};
use serde_json::{json, Value};
use vitalwatch_db::PatientStore;

fn reading_body(patient_id: &str) -> Value {
    json!({
        "patient_id": patient_id,
        "heart_rate": 84,
        "spo2": 96,
        "temperature": 37.2,
        "ecg_mean": 1.4
    })
}

fn drain_types(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Message>) -> Vec<String> {
    let mut types = Vec::new();
    while let Ok(Message::Text(text)) = rx.try_recv() {
        let json: Value = serde_json::from_str(&text).unwrap();
        types.push(json["type"].as_str().unwrap().to_string());
    }
    types
}

// ---------------------------------------------------------------------------
// Test: a critical reading returns the summary and fans out data + alert
// ---------------------------------------------------------------------------

#[tokio::test]
async fn critical_reading_returns_summary_and_alerts_observers() {
    let app = common::build_test_app(Arc::new(StubModel(json!([150.0, 95.0]))));
    let mut observer = app.ws_manager.add("dashboard".into()).await;

    let response = post_json(app.router, "/api/v1/sensor-data", reading_body("P-001")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["predicted_bp"], "150/95");
    assert_eq!(json["data"]["severity"], "critical");
    assert!(json["data"]["confidence"].is_number());

    assert_eq!(drain_types(&mut observer), vec!["sensor-data", "alert"]);
}

// ---------------------------------------------------------------------------
// Test: a normal reading fans out the data event only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn normal_reading_broadcasts_data_only() {
    let app = common::build_test_app(Arc::new(StubModel(json!([110.0, 70.0]))));
    let mut observer = app.ws_manager.add("dashboard".into()).await;

    let response = post_json(app.router, "/api/v1/sensor-data", reading_body("P-001")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["severity"], "low");

    assert_eq!(drain_types(&mut observer), vec!["sensor-data"]);
}

// ---------------------------------------------------------------------------
// Test: a reading with a missing field is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_field_is_rejected() {
    let app = common::build_test_app(Arc::new(StubModel(json!([120.0, 80.0]))));
    let mut observer = app.ws_manager.add("dashboard".into()).await;

    let body = json!({
        "patient_id": "P-001",
        "heart_rate": 84,
        "spo2": 96,
        "temperature": 37.2
        // ecg_mean missing
    });
    let response = post_json(app.router, "/api/v1/sensor-data", body).await;

    assert!(
        response.status().is_client_error(),
        "expected 4xx, got {}",
        response.status()
    );
    assert!(drain_types(&mut observer).is_empty());
}

// ---------------------------------------------------------------------------
// Test: an empty patient id is a structured validation error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_patient_id_is_a_validation_error() {
    let app = common::build_test_app(Arc::new(StubModel(json!([120.0, 80.0]))));

    let response = post_json(app.router, "/api/v1/sensor-data", reading_body("")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: a dead model service maps to 502 with no side effects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn model_failure_maps_to_bad_gateway() {
    let app = common::build_test_app(Arc::new(FailingModel));
    let mut observer = app.ws_manager.add("dashboard".into()).await;

    let response = post_json(app.router, "/api/v1/sensor-data", reading_body("P-001")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "PREDICTION_FAILED");

    assert!(drain_types(&mut observer).is_empty());
    assert!(app
        .store
        .latest_for_patient("P-001")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: ingesting twice leaves the latest pointer on the second record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeated_ingest_supersedes_latest_record() {
    let app = common::build_test_app(Arc::new(StubModel(json!([128.0, 83.0]))));

    let first = post_json(
        app.router.clone(),
        "/api/v1/sensor-data",
        reading_body("P-001"),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app.router, "/api/v1/sensor-data", reading_body("P-001")).await;
    assert_eq!(second.status(), StatusCode::OK);

    let records = app.store.list_records("P-001", 10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].recorded_at > records[1].recorded_at);

    let latest = app.store.latest_for_patient("P-001").await.unwrap().unwrap();
    assert_eq!(latest.recorded_at, records[0].recorded_at);
}
