//! Alert row model.

use sqlx::FromRow;
use vitalwatch_core::alert::StoredAlert;
use vitalwatch_core::types::{DbId, Timestamp};

use crate::store::StoreError;

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow)]
pub struct AlertRow {
    pub id: DbId,
    pub patient_id: String,
    pub severity: String,
    pub message: String,
    pub triggered_at: Timestamp,
}

impl TryFrom<AlertRow> for StoredAlert {
    type Error = StoreError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        let severity = row
            .severity
            .parse()
            .map_err(|_| StoreError::Malformed(format!("severity '{}'", row.severity)))?;

        Ok(StoredAlert {
            patient_id: row.patient_id,
            severity,
            message: row.message,
            triggered_at: row.triggered_at,
        })
    }
}
