//! Repository for the `sensor_records` table.

use sqlx::PgPool;
use vitalwatch_core::record::SensorRecord;

use crate::models::sensor_record::SensorRecordRow;

/// Column list for `sensor_records` queries.
const RECORD_COLUMNS: &str = "id, patient_id, heart_rate, spo2, temperature, ecg_mean, \
     systolic, diastolic, severity, risk_label, confidence, recorded_at";

/// Provides read/write operations for processed sensor records.
pub struct SensorRecordRepo;

impl SensorRecordRepo {
    /// Insert a processed record. Records are append-only.
    pub async fn insert(pool: &PgPool, record: &SensorRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO sensor_records \
                (patient_id, heart_rate, spo2, temperature, ecg_mean, \
                 systolic, diastolic, severity, risk_label, confidence, recorded_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(&record.patient_id)
        .bind(record.heart_rate)
        .bind(record.spo2)
        .bind(record.temperature)
        .bind(record.ecg_mean)
        .bind(record.systolic)
        .bind(record.diastolic)
        .bind(record.severity.as_str())
        .bind(&record.risk_label)
        .bind(record.confidence)
        .bind(record.recorded_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Fetch the most recent record for a patient.
    pub async fn latest_for_patient(
        pool: &PgPool,
        patient_id: &str,
    ) -> Result<Option<SensorRecordRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM sensor_records \
             WHERE patient_id = $1 ORDER BY recorded_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, SensorRecordRow>(&query)
            .bind(patient_id)
            .fetch_optional(pool)
            .await
    }

    /// List a patient's records, newest first.
    pub async fn list_for_patient(
        pool: &PgPool,
        patient_id: &str,
        limit: i64,
    ) -> Result<Vec<SensorRecordRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RECORD_COLUMNS} FROM sensor_records \
             WHERE patient_id = $1 ORDER BY recorded_at DESC LIMIT $2"
        );
        sqlx::query_as::<_, SensorRecordRow>(&query)
            .bind(patient_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
