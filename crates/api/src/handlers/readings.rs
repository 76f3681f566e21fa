//! Handlers for reading ingestion and reading history.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use vitalwatch_core::reading::SensorReading;
use vitalwatch_core::record::SensorRecord;
use vitalwatch_db::PatientStore;

use crate::error::AppResult;
use crate::ingest::IngestSummary;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /patients/{id}/readings`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
}

/// Maximum page size for reading history.
const MAX_LIMIT: i64 = 200;

/// Default page size for reading history.
const DEFAULT_LIMIT: i64 = 50;

/// POST /api/v1/sensor-data
///
/// The ingestion entry point: run one reading through the pipeline and
/// return the prediction summary. Validation and prediction failures
/// surface as structured errors; persistence trouble does not.
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(reading): Json<SensorReading>,
) -> AppResult<Json<DataResponse<IngestSummary>>> {
    let summary = state.pipeline.ingest(&reading).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/patients/{id}/readings
///
/// A patient's recent records, newest first.
pub async fn reading_history(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<SensorRecord>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let records = state.store.list_records(&patient_id, limit).await?;
    Ok(Json(DataResponse { data: records }))
}
