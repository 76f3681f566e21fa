//! Repository for the `patients` table.

use sqlx::PgPool;
use vitalwatch_core::patient::NewPatient;

use crate::models::patient::PatientRow;

/// Column list for `patients` queries.
const PATIENT_COLUMNS: &str =
    "id, patient_id, name, age, gender, condition, latest_record, created_at, updated_at";

/// Provides read/write operations for patient profiles.
pub struct PatientRepo;

impl PatientRepo {
    /// Insert a patient, or update its demographic fields if the
    /// `patient_id` already exists. The latest-record pointer is left
    /// untouched on update.
    pub async fn upsert(pool: &PgPool, patient: &NewPatient) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO patients (patient_id, name, age, gender, condition) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (patient_id) DO UPDATE SET \
                name = EXCLUDED.name, \
                age = EXCLUDED.age, \
                gender = EXCLUDED.gender, \
                condition = EXCLUDED.condition, \
                updated_at = now()",
        )
        .bind(&patient.patient_id)
        .bind(&patient.name)
        .bind(patient.age)
        .bind(&patient.gender)
        .bind(&patient.condition)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch a patient by its external identifier.
    pub async fn get(pool: &PgPool, patient_id: &str) -> Result<Option<PatientRow>, sqlx::Error> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = $1");
        sqlx::query_as::<_, PatientRow>(&query)
            .bind(patient_id)
            .fetch_optional(pool)
            .await
    }

    /// List all patients ordered by identifier.
    pub async fn list(pool: &PgPool) -> Result<Vec<PatientRow>, sqlx::Error> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY patient_id");
        sqlx::query_as::<_, PatientRow>(&query).fetch_all(pool).await
    }

    /// Overwrite the patient's latest-record pointer.
    ///
    /// Last write wins; a no-op when the patient does not exist, which
    /// matches readings arriving before profile creation.
    pub async fn set_latest_record(
        pool: &PgPool,
        patient_id: &str,
        record: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE patients SET latest_record = $2, updated_at = now() WHERE patient_id = $1",
        )
        .bind(patient_id)
        .bind(record)
        .execute(pool)
        .await?;
        Ok(())
    }
}
