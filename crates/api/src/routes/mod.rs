pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                          WebSocket (observer dashboards)
///
/// /sensor-data                 ingest a reading (POST)
///
/// /patients                    list (GET), create/update (POST)
/// /patients/{id}               profile + latest record (GET)
/// /patients/{id}/readings      reading history (GET)
///
/// /alerts                      recent alerts (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/sensor-data", post(handlers::readings::ingest_reading))
        .route(
            "/patients",
            get(handlers::patients::list_patients).post(handlers::patients::create_patient),
        )
        .route("/patients/{id}", get(handlers::patients::get_patient))
        .route(
            "/patients/{id}/readings",
            get(handlers::readings::reading_history),
        )
        .route("/alerts", get(handlers::alerts::list_alerts))
}
