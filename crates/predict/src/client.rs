//! HTTP client for the external blood-pressure model service.

use async_trait::async_trait;

/// Errors from the prediction boundary.
///
/// Both variants are terminal for the ingest call that triggered the
/// prediction: nothing is persisted and nothing is broadcast.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// The model service was unreachable or answered non-2xx.
    #[error("Prediction request failed: {0}")]
    Request(String),

    /// The model answered 2xx but the payload could not be normalized.
    #[error("Model returned malformed output: {0}")]
    MalformedOutput(String),
}

/// The external model contract.
///
/// Features are passed in fixed order: heart rate, SpO2, temperature,
/// ECG mean. The raw response is returned untouched; shape
/// normalization is the adapter's job.
#[async_trait]
pub trait BpModel: Send + Sync {
    async fn predict(&self, features: [f64; 4]) -> Result<serde_json::Value, PredictError>;
}

/// Production model client.
///
/// POSTs `{"features": [hr, spo2, temperature, ecg_mean]}` to
/// `{base_url}/predict` and hands back the response body as JSON.
pub struct HttpBpModel {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBpModel {
    /// Create a client targeting the ML service at `base_url`
    /// (e.g. `http://127.0.0.1:9000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl BpModel for HttpBpModel {
    async fn predict(&self, features: [f64; 4]) -> Result<serde_json::Value, PredictError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(url = %url, ?features, "Requesting BP prediction");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "features": features }))
            .send()
            .await
            .map_err(|e| PredictError::Request(format!("POST {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Request(format!(
                "POST {url}: model service answered {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PredictError::MalformedOutput(format!("response body: {e}")))
    }
}
