//! Patient entity row model.

use sqlx::FromRow;
use vitalwatch_core::patient::PatientProfile;
use vitalwatch_core::types::{DbId, Timestamp};

use crate::store::StoreError;

/// A row from the `patients` table.
///
/// `latest_record` is the denormalized JSONB pointer to the most recent
/// sensor record, overwritten on every new reading.
#[derive(Debug, Clone, FromRow)]
pub struct PatientRow {
    pub id: DbId,
    pub patient_id: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub condition: Option<String>,
    pub latest_record: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<PatientRow> for PatientProfile {
    type Error = StoreError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let latest_record = row
            .latest_record
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                StoreError::Malformed(format!(
                    "latest_record for patient {}: {e}",
                    row.patient_id
                ))
            })?;

        Ok(PatientProfile {
            patient_id: row.patient_id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            condition: row.condition,
            latest_record,
        })
    }
}
