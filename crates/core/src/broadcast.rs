//! Wire messages pushed to connected observer dashboards.

use serde::{Deserialize, Serialize};

use crate::record::SensorRecord;
use crate::severity::SeverityTier;
use crate::types::Timestamp;

/// A message fanned out to every connected observer.
///
/// Wire-only: never persisted. Tagged on `"type"` so dashboard clients
/// can dispatch without sniffing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BroadcastMessage {
    /// A freshly processed sensor record.
    #[serde(rename = "sensor-data")]
    SensorData { data: SensorRecord },

    /// A high-urgency notification for one patient.
    #[serde(rename = "alert")]
    Alert {
        patient_id: String,
        severity: SeverityTier,
        message: String,
        timestamp: Timestamp,
    },
}

impl BroadcastMessage {
    /// Build the data event for a processed record.
    pub fn sensor_data(record: SensorRecord) -> Self {
        Self::SensorData { data: record }
    }

    /// Build the alert event for a record whose tier is alerting.
    ///
    /// The message format is fixed; dashboards display it verbatim.
    pub fn alert(record: &SensorRecord) -> Self {
        Self::Alert {
            patient_id: record.patient_id.clone(),
            severity: record.severity,
            message: format!("High BP detected: {}", record.bp_display()),
            timestamp: record.recorded_at,
        }
    }
}
