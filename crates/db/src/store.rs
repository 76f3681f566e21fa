//! The patient state store boundary.
//!
//! The ingestion pipeline and the HTTP handlers depend on
//! [`PatientStore`] rather than on a concrete database so that tests
//! can substitute a double and the server can run without Postgres.

use async_trait::async_trait;
use vitalwatch_core::alert::StoredAlert;
use vitalwatch_core::patient::{NewPatient, PatientProfile};
use vitalwatch_core::record::SensorRecord;

use crate::repositories::{AlertRepo, PatientRepo, SensorRecordRepo};
use crate::DbPool;

/// Errors surfaced by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying database failed or is unreachable.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document could not be decoded.
    #[error("Stored document malformed: {0}")]
    Malformed(String),
}

/// Abstract persistence for patient profiles, sensor records, and
/// alerts.
///
/// No cross-collection transactional guarantee: the record insert and
/// the latest-pointer update are independent writes.
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// Create a patient or update its demographic fields.
    async fn upsert_patient(&self, patient: &NewPatient) -> Result<(), StoreError>;

    /// Fetch a profile, including its latest-record pointer.
    async fn get_patient(&self, patient_id: &str) -> Result<Option<PatientProfile>, StoreError>;

    /// List all profiles.
    async fn list_patients(&self) -> Result<Vec<PatientProfile>, StoreError>;

    /// Append a processed sensor record.
    async fn insert_record(&self, record: &SensorRecord) -> Result<(), StoreError>;

    /// The most recent record for a patient, if any.
    async fn latest_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Option<SensorRecord>, StoreError>;

    /// Overwrite the patient's latest-record pointer (last write wins;
    /// no-op for unknown patients).
    async fn set_latest_record(
        &self,
        patient_id: &str,
        record: &SensorRecord,
    ) -> Result<(), StoreError>;

    /// A patient's recent records, newest first.
    async fn list_records(
        &self,
        patient_id: &str,
        limit: i64,
    ) -> Result<Vec<SensorRecord>, StoreError>;

    /// Persist an alert.
    async fn insert_alert(&self, alert: &StoredAlert) -> Result<(), StoreError>;

    /// Recent alerts across all patients, newest first.
    async fn list_alerts(&self, limit: i64) -> Result<Vec<StoredAlert>, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> bool;
}

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgPatientStore {
    pool: DbPool,
}

impl PgPatientStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn upsert_patient(&self, patient: &NewPatient) -> Result<(), StoreError> {
        PatientRepo::upsert(&self.pool, patient).await?;
        Ok(())
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Option<PatientProfile>, StoreError> {
        PatientRepo::get(&self.pool, patient_id)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn list_patients(&self) -> Result<Vec<PatientProfile>, StoreError> {
        PatientRepo::list(&self.pool)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn insert_record(&self, record: &SensorRecord) -> Result<(), StoreError> {
        SensorRecordRepo::insert(&self.pool, record).await?;
        Ok(())
    }

    async fn latest_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Option<SensorRecord>, StoreError> {
        SensorRecordRepo::latest_for_patient(&self.pool, patient_id)
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn set_latest_record(
        &self,
        patient_id: &str,
        record: &SensorRecord,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_value(record)
            .map_err(|e| StoreError::Malformed(format!("encoding latest_record: {e}")))?;
        PatientRepo::set_latest_record(&self.pool, patient_id, &json).await?;
        Ok(())
    }

    async fn list_records(
        &self,
        patient_id: &str,
        limit: i64,
    ) -> Result<Vec<SensorRecord>, StoreError> {
        SensorRecordRepo::list_for_patient(&self.pool, patient_id, limit)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn insert_alert(&self, alert: &StoredAlert) -> Result<(), StoreError> {
        AlertRepo::insert(&self.pool, alert).await?;
        Ok(())
    }

    async fn list_alerts(&self, limit: i64) -> Result<Vec<StoredAlert>, StoreError> {
        AlertRepo::list_recent(&self.pool, limit)
            .await?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn ping(&self) -> bool {
        crate::health_check(&self.pool).await.is_ok()
    }
}
