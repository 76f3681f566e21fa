//! Handlers for the `/patients` resource.
//!
//! Profile management is plain CRUD; the interesting state (the
//! latest-record pointer) is maintained by the ingestion pipeline.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vitalwatch_core::error::CoreError;
use vitalwatch_core::patient::{NewPatient, PatientProfile};
use vitalwatch_db::PatientStore;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/patients
///
/// Create a patient profile, or update its demographic fields if the
/// identifier already exists.
pub async fn create_patient(
    State(state): State<AppState>,
    Json(patient): Json<NewPatient>,
) -> AppResult<(StatusCode, Json<DataResponse<NewPatient>>)> {
    patient.validate()?;
    state.store.upsert_patient(&patient).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: patient })))
}

/// GET /api/v1/patients
///
/// List all patient profiles with their latest-record pointers.
pub async fn list_patients(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PatientProfile>>>> {
    let patients = state.store.list_patients().await?;
    Ok(Json(DataResponse { data: patients }))
}

/// GET /api/v1/patients/{id}
///
/// Fetch one profile including its latest sensor record, or 404.
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> AppResult<Json<DataResponse<PatientProfile>>> {
    let profile = state
        .store
        .get_patient(&patient_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Patient",
            id: patient_id,
        }))?;
    Ok(Json(DataResponse { data: profile }))
}
