//! Handlers for the `/alerts` resource.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use vitalwatch_core::alert::StoredAlert;
use vitalwatch_db::PatientStore;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /alerts`.
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
}

/// Maximum page size for alert listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for alert listing.
const DEFAULT_LIMIT: i64 = 50;

/// GET /api/v1/alerts
///
/// Recent alerts across all patients, newest first.
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(params): Query<AlertQuery>,
) -> AppResult<Json<DataResponse<Vec<StoredAlert>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let alerts = state.store.list_alerts(limit).await?;
    Ok(Json(DataResponse { data: alerts }))
}
