//! Blood-pressure model boundary.
//!
//! [`BpModel`] abstracts the external prediction service;
//! [`HttpBpModel`] is the production implementation talking to the ML
//! service over HTTP. [`PredictionAdapter`] normalizes the model's
//! heterogeneous output shapes into a fixed [`PredictionResult`].

mod adapter;
mod client;

pub use adapter::PredictionAdapter;
pub use client::{BpModel, HttpBpModel, PredictError};
