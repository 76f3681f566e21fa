pub mod alerts;
pub mod patients;
pub mod readings;
