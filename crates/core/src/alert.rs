//! Persisted alert records.

use serde::{Deserialize, Serialize};

use crate::record::SensorRecord;
use crate::severity::SeverityTier;
use crate::types::Timestamp;

/// A durable copy of an alert broadcast, kept for the alert history
/// views. Written best-effort alongside the broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAlert {
    pub patient_id: String,
    pub severity: SeverityTier,
    pub message: String,
    pub triggered_at: Timestamp,
}

impl StoredAlert {
    /// Build the stored alert matching the broadcast for `record`.
    pub fn for_record(record: &SensorRecord) -> Self {
        Self {
            patient_id: record.patient_id.clone(),
            severity: record.severity,
            message: format!("High BP detected: {}", record.bp_display()),
            triggered_at: record.recorded_at,
        }
    }
}
