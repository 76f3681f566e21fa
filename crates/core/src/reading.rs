//! Incoming sensor reading and its shape validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One batch of sensor measurements for a patient, as sent by a
/// monitoring device.
///
/// All numeric fields are required; a missing field fails JSON
/// deserialization before the pipeline ever sees the reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    pub patient_id: String,
    /// Heart rate in beats per minute.
    pub heart_rate: i64,
    /// Blood-oxygen saturation in percent.
    pub spo2: i64,
    /// Body temperature in degrees Celsius.
    pub temperature: f64,
    /// Derived ECG scalar feature.
    pub ecg_mean: f64,
}

impl SensorReading {
    /// Check the reading's shape.
    ///
    /// Rejects an empty patient identifier and non-finite floats (NaN
    /// or infinity survive JSON parsing when readings are constructed
    /// programmatically). No numeric-range validation is performed;
    /// out-of-range vitals are a clinical concern, not a shape error.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.patient_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "patient_id must not be empty".into(),
            ));
        }
        if !self.temperature.is_finite() {
            return Err(CoreError::Validation(
                "temperature must be a finite number".into(),
            ));
        }
        if !self.ecg_mean.is_finite() {
            return Err(CoreError::Validation(
                "ecg_mean must be a finite number".into(),
            ));
        }
        Ok(())
    }
}
