use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vitalwatch_api::config::ServerConfig;
use vitalwatch_api::ingest::IngestPipeline;
use vitalwatch_api::router::build_app_router;
use vitalwatch_api::state::AppState;
use vitalwatch_api::ws::WsManager;
use vitalwatch_db::{MemoryPatientStore, PatientStore};
use vitalwatch_predict::{BpModel, PredictError, PredictionAdapter};

/// Model double that answers every prediction with a fixed payload.
pub struct StubModel(pub Value);

#[async_trait]
impl BpModel for StubModel {
    async fn predict(&self, _features: [f64; 4]) -> Result<Value, PredictError> {
        Ok(self.0.clone())
    }
}

/// Model double that is always down.
pub struct FailingModel;

#[async_trait]
impl BpModel for FailingModel {
    async fn predict(&self, _features: [f64; 4]) -> Result<Value, PredictError> {
        Err(PredictError::Request("connection refused".into()))
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev
/// default) and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        ml_service_url: "http://127.0.0.1:9000".to_string(),
    }
}

/// Everything a test needs to drive the app and observe its state.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<dyn PatientStore>,
    pub ws_manager: Arc<WsManager>,
}

/// Build the full application router with all middleware layers, an
/// in-memory store, and a stubbed model.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(model: Arc<dyn BpModel>) -> TestApp {
    let config = test_config();
    let store: Arc<dyn PatientStore> = Arc::new(MemoryPatientStore::new());
    let ws_manager = Arc::new(WsManager::new());

    let adapter = PredictionAdapter::new(model);
    let pipeline = Arc::new(IngestPipeline::new(
        Arc::clone(&store),
        adapter,
        Arc::clone(&ws_manager),
    ));

    let state = AppState {
        store: Arc::clone(&store),
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        pipeline,
    };

    TestApp {
        router: build_app_router(state, &config),
        store,
        ws_manager,
    }
}

/// Issue a GET request against the app.
pub async fn get(router: Router, uri: &str) -> Response {
    router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(router: Router, uri: &str, body: Value) -> Response {
    router
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
