mod alert_repo;
mod patient_repo;
mod sensor_record_repo;

pub use alert_repo::AlertRepo;
pub use patient_repo::PatientRepo;
pub use sensor_record_repo::SensorRecordRepo;
