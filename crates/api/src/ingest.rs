//! The reading ingestion pipeline.
//!
//! One entry point per reading: validate, predict, classify, assemble
//! the durable record, write through the store, and fan the result out
//! to every connected observer. Validation and prediction failures are
//! terminal for the call; persistence failures are logged and do not
//! block the broadcast, so live observers keep seeing fresh data even
//! with the store down.

use std::sync::Arc;

use serde::Serialize;
use vitalwatch_core::alert::StoredAlert;
use vitalwatch_core::broadcast::BroadcastMessage;
use vitalwatch_core::clock::MonotonicClock;
use vitalwatch_core::error::CoreError;
use vitalwatch_core::reading::SensorReading;
use vitalwatch_core::record::SensorRecord;
use vitalwatch_core::severity::{self, SeverityTier};
use vitalwatch_db::PatientStore;
use vitalwatch_predict::{PredictError, PredictionAdapter};

use crate::ws::WsManager;

/// Failures that abort an ingest call before any side effect.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The reading failed shape validation.
    #[error(transparent)]
    Validation(CoreError),

    /// The external model was unavailable or answered garbage.
    #[error(transparent)]
    Prediction(#[from] PredictError),
}

/// Summary returned to the device that submitted the reading.
#[derive(Debug, Clone, Serialize)]
pub struct IngestSummary {
    /// Predicted blood pressure as `"<systolic>/<diastolic>"`.
    pub predicted_bp: String,
    pub severity: SeverityTier,
    pub confidence: f64,
}

/// Orchestrates the ingestion of one sensor reading.
///
/// Stateless across calls apart from the shared store and hub; any
/// number of `ingest` calls may run concurrently. Two readings for the
/// same patient racing each other resolve last-write-wins on the
/// latest-record pointer.
pub struct IngestPipeline {
    store: Arc<dyn PatientStore>,
    adapter: PredictionAdapter,
    hub: Arc<WsManager>,
    clock: MonotonicClock,
}

impl IngestPipeline {
    pub fn new(
        store: Arc<dyn PatientStore>,
        adapter: PredictionAdapter,
        hub: Arc<WsManager>,
    ) -> Self {
        Self {
            store,
            adapter,
            hub,
            clock: MonotonicClock::new(),
        }
    }

    /// Process one reading end to end.
    pub async fn ingest(&self, reading: &SensorReading) -> Result<IngestSummary, IngestError> {
        reading.validate().map_err(IngestError::Validation)?;

        let prediction = self.adapter.predict(reading).await?;
        let tier = severity::classify(prediction.systolic, prediction.diastolic);
        let record = SensorRecord::assemble(reading, prediction, tier, self.clock.now());

        // Write-through: both writes are best-effort; a dead store must
        // not keep fresh data from the observers.
        if let Err(e) = self.store.insert_record(&record).await {
            tracing::warn!(
                patient_id = %record.patient_id,
                error = %e,
                "Failed to persist sensor record, continuing",
            );
        }
        if let Err(e) = self.store.set_latest_record(&record.patient_id, &record).await {
            tracing::warn!(
                patient_id = %record.patient_id,
                error = %e,
                "Failed to update latest-record pointer, continuing",
            );
        }

        let delivered = self
            .hub
            .broadcast(&BroadcastMessage::sensor_data(record.clone()))
            .await;
        tracing::debug!(
            patient_id = %record.patient_id,
            severity = %tier,
            delivered,
            "Sensor data fanned out",
        );

        if tier.is_alerting() {
            let alert = StoredAlert::for_record(&record);
            if let Err(e) = self.store.insert_alert(&alert).await {
                tracing::warn!(
                    patient_id = %record.patient_id,
                    error = %e,
                    "Failed to persist alert, continuing",
                );
            }
            self.hub.broadcast(&BroadcastMessage::alert(&record)).await;
            tracing::info!(
                patient_id = %record.patient_id,
                severity = %tier,
                "Alert broadcast",
            );
        }

        Ok(IngestSummary {
            predicted_bp: record.bp_display(),
            severity: tier,
            confidence: record.confidence,
        })
    }
}
