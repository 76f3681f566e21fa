//! Patient profile types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::record::SensorRecord;

/// A patient profile with its denormalized latest-record pointer.
///
/// The pointer is overwritten on every new reading (last write wins);
/// there is no versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    pub patient_id: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub condition: Option<String>,
    pub latest_record: Option<SensorRecord>,
}

/// Input for creating or updating a patient profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
    pub patient_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl NewPatient {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.patient_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "patient_id must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_to_none() {
        let patient: NewPatient =
            serde_json::from_str(r#"{"patient_id": "P-001"}"#).unwrap();
        assert_eq!(patient.patient_id, "P-001");
        assert!(patient.name.is_none());
        assert!(patient.validate().is_ok());
    }

    #[test]
    fn empty_id_is_rejected() {
        let patient = NewPatient {
            patient_id: "".into(),
            name: None,
            age: None,
            gender: None,
            condition: None,
        };
        assert!(patient.validate().is_err());
    }
}
