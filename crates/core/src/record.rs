//! Prediction output and the persisted per-reading record.

use serde::{Deserialize, Serialize};

use crate::reading::SensorReading;
use crate::severity::SeverityTier;
use crate::types::Timestamp;

/// Normalized output of one external model invocation.
///
/// Ephemeral: produced fresh per reading and folded into a
/// [`SensorRecord`], never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub systolic: f64,
    pub diastolic: f64,
    /// Confidence in percent, always within `[0, 100]`.
    pub confidence: f64,
}

/// The durable result of processing one sensor reading.
///
/// Immutable once written; a newer reading supersedes it rather than
/// updating it in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRecord {
    pub patient_id: String,
    pub heart_rate: i64,
    pub spo2: i64,
    pub temperature: f64,
    pub ecg_mean: f64,
    pub systolic: f64,
    pub diastolic: f64,
    pub severity: SeverityTier,
    pub risk_label: String,
    pub confidence: f64,
    pub recorded_at: Timestamp,
}

impl SensorRecord {
    /// Assemble a record from a validated reading, its prediction, and
    /// the classified tier.
    pub fn assemble(
        reading: &SensorReading,
        prediction: PredictionResult,
        severity: SeverityTier,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            patient_id: reading.patient_id.clone(),
            heart_rate: reading.heart_rate,
            spo2: reading.spo2,
            temperature: reading.temperature,
            ecg_mean: reading.ecg_mean,
            systolic: prediction.systolic,
            diastolic: prediction.diastolic,
            severity,
            risk_label: severity.label().to_string(),
            confidence: prediction.confidence,
            recorded_at,
        }
    }

    /// The `"<systolic>/<diastolic>"` display string used in summaries
    /// and alert messages.
    pub fn bp_display(&self) -> String {
        format!("{}/{}", self.systolic, self.diastolic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity;

    #[test]
    fn assemble_copies_reading_and_prediction() {
        let reading = SensorReading {
            patient_id: "P-007".into(),
            heart_rate: 88,
            spo2: 96,
            temperature: 37.1,
            ecg_mean: 1.4,
        };
        let prediction = PredictionResult {
            systolic: 135.25,
            diastolic: 88.5,
            confidence: 91.0,
        };
        let tier = severity::classify(prediction.systolic, prediction.diastolic);
        let now = chrono::Utc::now();

        let record = SensorRecord::assemble(&reading, prediction, tier, now);

        assert_eq!(record.patient_id, "P-007");
        assert_eq!(record.heart_rate, 88);
        assert_eq!(record.systolic, 135.25);
        assert_eq!(record.severity, SeverityTier::High);
        assert_eq!(record.risk_label, "High BP Stage 1");
        assert_eq!(record.recorded_at, now);
    }

    #[test]
    fn bp_display_drops_trailing_zeros() {
        let record = SensorRecord {
            patient_id: "P-001".into(),
            heart_rate: 70,
            spo2: 98,
            temperature: 36.5,
            ecg_mean: 1.0,
            systolic: 150.0,
            diastolic: 95.5,
            severity: SeverityTier::Critical,
            risk_label: "High BP Stage 2".into(),
            confidence: 90.0,
            recorded_at: chrono::Utc::now(),
        };
        assert_eq!(record.bp_display(), "150/95.5");
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let record = SensorRecord {
            patient_id: "P-001".into(),
            heart_rate: 70,
            spo2: 98,
            temperature: 36.5,
            ecg_mean: 1.0,
            systolic: 118.0,
            diastolic: 76.0,
            severity: SeverityTier::Low,
            risk_label: "Normal".into(),
            confidence: 88.2,
            recorded_at: chrono::Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        let ts = json["recorded_at"].as_str().unwrap();
        assert!(ts.contains('T'), "expected ISO-8601 timestamp, got {ts}");
    }
}
