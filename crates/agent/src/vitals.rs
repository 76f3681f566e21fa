//! Simulated vital-sign generation.
//!
//! Stands in for a bedside sensor unit: each call produces one
//! plausible reading for the configured patient. Ranges cover a
//! resting-to-agitated adult so the backend sees all severity tiers
//! over time.

use rand::Rng;
use vitalwatch_core::reading::SensorReading;

/// Heart rate range in beats per minute.
const HEART_RATE_RANGE: std::ops::RangeInclusive<i64> = 62..=108;
/// Blood-oxygen saturation range in percent.
const SPO2_RANGE: std::ops::RangeInclusive<i64> = 93..=100;
/// Body temperature range in degrees Celsius.
const TEMPERATURE_RANGE: std::ops::Range<f64> = 36.1..37.8;
/// Derived ECG feature range.
const ECG_MEAN_RANGE: std::ops::Range<f64> = 0.7..2.7;

/// Produces random in-range readings for one patient.
pub struct VitalsSimulator {
    patient_id: String,
}

impl VitalsSimulator {
    pub fn new(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
        }
    }

    /// Generate the next reading.
    pub fn next_reading(&self) -> SensorReading {
        let mut rng = rand::rng();
        SensorReading {
            patient_id: self.patient_id.clone(),
            heart_rate: rng.random_range(HEART_RATE_RANGE),
            spo2: rng.random_range(SPO2_RANGE),
            temperature: round1(rng.random_range(TEMPERATURE_RANGE)),
            ecg_mean: round2(rng.random_range(ECG_MEAN_RANGE)),
        }
    }

    /// Bounds used by `next_reading`, exposed for tests.
    pub fn ranges() -> (
        std::ops::RangeInclusive<i64>,
        std::ops::RangeInclusive<i64>,
        std::ops::Range<f64>,
        std::ops::Range<f64>,
    ) {
        (
            HEART_RATE_RANGE,
            SPO2_RANGE,
            TEMPERATURE_RANGE,
            ECG_MEAN_RANGE,
        )
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
