pub mod alert;
pub mod patient;
pub mod sensor_record;
