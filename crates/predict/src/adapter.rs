//! Normalization of model output into a fixed prediction record.

use std::sync::Arc;

use rand::Rng;
use serde_json::Value;
use vitalwatch_core::reading::SensorReading;
use vitalwatch_core::record::PredictionResult;

use crate::client::{BpModel, PredictError};

/// Lower bound of the synthesized confidence range.
const FALLBACK_CONFIDENCE_MIN: f64 = 85.0;
/// Upper bound (exclusive) of the synthesized confidence range.
const FALLBACK_CONFIDENCE_MAX: f64 = 95.0;

/// Wraps a [`BpModel`] and normalizes whatever it answers into a
/// [`PredictionResult`].
///
/// Accepted output shapes:
/// - a numeric sequence with at least two elements → (systolic, diastolic)
/// - a single number → (systolic, 0.0)
/// - an object with a `"prediction"` field holding either of the above,
///   optionally alongside a `"probabilities"` array
///
/// Confidence is `100 × max(probability)` when the model reports
/// probabilities. Otherwise it is synthesized pseudo-randomly in
/// [85, 95); that fallback is a placeholder heuristic, not a
/// calibrated estimate, and callers must not treat it as
/// statistically meaningful.
///
/// Systolic, diastolic, and confidence are rounded to two decimals.
pub struct PredictionAdapter {
    model: Arc<dyn BpModel>,
}

impl PredictionAdapter {
    pub fn new(model: Arc<dyn BpModel>) -> Self {
        Self { model }
    }

    /// Invoke the model for one reading and normalize its output.
    pub async fn predict(&self, reading: &SensorReading) -> Result<PredictionResult, PredictError> {
        let features = [
            reading.heart_rate as f64,
            reading.spo2 as f64,
            reading.temperature,
            reading.ecg_mean,
        ];
        let raw = self.model.predict(features).await?;
        normalize(&raw)
    }
}

/// Normalize a raw model response into a rounded [`PredictionResult`].
fn normalize(raw: &Value) -> Result<PredictionResult, PredictError> {
    let (payload, probabilities) = match raw {
        Value::Object(obj) => {
            let payload = obj.get("prediction").ok_or_else(|| {
                PredictError::MalformedOutput("object response without 'prediction' field".into())
            })?;
            (payload, obj.get("probabilities"))
        }
        other => (other, None),
    };

    let (systolic, diastolic) = match payload {
        Value::Array(elems) if elems.len() >= 2 => {
            let systolic = as_number(&elems[0])?;
            let diastolic = as_number(&elems[1])?;
            (systolic, diastolic)
        }
        Value::Array(elems) => {
            return Err(PredictError::MalformedOutput(format!(
                "prediction sequence has {} element(s), need 2",
                elems.len()
            )));
        }
        Value::Number(_) => (as_number(payload)?, 0.0),
        other => {
            return Err(PredictError::MalformedOutput(format!(
                "unsupported prediction shape: {other}"
            )));
        }
    };

    let confidence = match probabilities.and_then(max_probability) {
        Some(p) => (p * 100.0).clamp(0.0, 100.0),
        None => synthesize_confidence(),
    };

    Ok(PredictionResult {
        systolic: round2(systolic),
        diastolic: round2(diastolic),
        confidence: round2(confidence),
    })
}

fn as_number(value: &Value) -> Result<f64, PredictError> {
    value
        .as_f64()
        .ok_or_else(|| PredictError::MalformedOutput(format!("expected a number, got {value}")))
}

fn max_probability(value: &Value) -> Option<f64> {
    value
        .as_array()?
        .iter()
        .filter_map(Value::as_f64)
        .fold(None, |max, p| match max {
            Some(m) if m >= p => Some(m),
            _ => Some(p),
        })
}

fn synthesize_confidence() -> f64 {
    rand::rng().random_range(FALLBACK_CONFIDENCE_MIN..FALLBACK_CONFIDENCE_MAX)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
