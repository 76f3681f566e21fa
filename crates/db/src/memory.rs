//! In-process store implementation.
//!
//! Backs the server when no `DATABASE_URL` is configured and serves as
//! the test double for the pipeline and API tests. Semantics mirror
//! [`PgPatientStore`](crate::store::PgPatientStore): append-only
//! records, last-write-wins latest pointer, pointer update is a no-op
//! for unknown patients.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vitalwatch_core::alert::StoredAlert;
use vitalwatch_core::patient::{NewPatient, PatientProfile};
use vitalwatch_core::record::SensorRecord;

use crate::store::{PatientStore, StoreError};

#[derive(Default)]
struct Inner {
    patients: HashMap<String, PatientProfile>,
    records: HashMap<String, Vec<SensorRecord>>,
    alerts: Vec<StoredAlert>,
}

/// In-memory [`PatientStore`].
#[derive(Default)]
pub struct MemoryPatientStore {
    inner: RwLock<Inner>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn upsert_patient(&self, patient: &NewPatient) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner
            .patients
            .entry(patient.patient_id.clone())
            .or_insert_with(|| PatientProfile {
                patient_id: patient.patient_id.clone(),
                name: None,
                age: None,
                gender: None,
                condition: None,
                latest_record: None,
            });
        entry.name = patient.name.clone();
        entry.age = patient.age;
        entry.gender = patient.gender.clone();
        entry.condition = patient.condition.clone();
        Ok(())
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Option<PatientProfile>, StoreError> {
        Ok(self.inner.read().await.patients.get(patient_id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<PatientProfile>, StoreError> {
        let inner = self.inner.read().await;
        let mut patients: Vec<_> = inner.patients.values().cloned().collect();
        patients.sort_by(|a, b| a.patient_id.cmp(&b.patient_id));
        Ok(patients)
    }

    async fn insert_record(&self, record: &SensorRecord) -> Result<(), StoreError> {
        self.inner
            .write()
            .await
            .records
            .entry(record.patient_id.clone())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    async fn latest_for_patient(
        &self,
        patient_id: &str,
    ) -> Result<Option<SensorRecord>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .records
            .get(patient_id)
            .and_then(|records| records.last().cloned()))
    }

    async fn set_latest_record(
        &self,
        patient_id: &str,
        record: &SensorRecord,
    ) -> Result<(), StoreError> {
        if let Some(profile) = self.inner.write().await.patients.get_mut(patient_id) {
            profile.latest_record = Some(record.clone());
        }
        Ok(())
    }

    async fn list_records(
        &self,
        patient_id: &str,
        limit: i64,
    ) -> Result<Vec<SensorRecord>, StoreError> {
        let inner = self.inner.read().await;
        let records = inner
            .records
            .get(patient_id)
            .map(|records| {
                records
                    .iter()
                    .rev()
                    .take(limit.max(0) as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    async fn insert_alert(&self, alert: &StoredAlert) -> Result<(), StoreError> {
        self.inner.write().await.alerts.push(alert.clone());
        Ok(())
    }

    async fn list_alerts(&self, limit: i64) -> Result<Vec<StoredAlert>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .alerts
            .iter()
            .rev()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> bool {
        true
    }
}
