//! Sensor record row model.

use sqlx::FromRow;
use vitalwatch_core::record::SensorRecord;
use vitalwatch_core::types::{DbId, Timestamp};

use crate::store::StoreError;

/// A row from the `sensor_records` table.
#[derive(Debug, Clone, FromRow)]
pub struct SensorRecordRow {
    pub id: DbId,
    pub patient_id: String,
    pub heart_rate: i64,
    pub spo2: i64,
    pub temperature: f64,
    pub ecg_mean: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub severity: String,
    pub risk_label: String,
    pub confidence: f64,
    pub recorded_at: Timestamp,
}

impl TryFrom<SensorRecordRow> for SensorRecord {
    type Error = StoreError;

    fn try_from(row: SensorRecordRow) -> Result<Self, Self::Error> {
        let severity = row
            .severity
            .parse()
            .map_err(|_| StoreError::Malformed(format!("severity '{}'", row.severity)))?;

        Ok(SensorRecord {
            patient_id: row.patient_id,
            heart_rate: row.heart_rate,
            spo2: row.spo2,
            temperature: row.temperature,
            ecg_mean: row.ecg_mean,
            systolic: row.systolic,
            diastolic: row.diastolic,
            severity,
            risk_label: row.risk_label,
            confidence: row.confidence,
            recorded_at: row.recorded_at,
        })
    }
}
