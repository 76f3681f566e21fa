//! Reading push loop.
//!
//! Periodically generates a reading via
//! [`VitalsSimulator`](crate::vitals::VitalsSimulator) and POSTs it to
//! the backend ingestion endpoint, logging the returned prediction
//! summary. Failures are logged and retried on the next cycle after a
//! fixed delay.

use std::time::Duration;

use crate::vitals::VitalsSimulator;

/// Extra delay after a failed push before the next attempt.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Run the reading push loop indefinitely.
///
/// This function never returns under normal operation.
pub async fn run(api_url: &str, simulator: &VitalsSimulator, interval: Duration) {
    let client = reqwest::Client::new();
    let endpoint = format!("{api_url}/api/v1/sensor-data");
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;
        let reading = simulator.next_reading();

        match client.post(&endpoint).json(&reading).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<serde_json::Value>().await {
                    Ok(body) => {
                        tracing::info!(
                            patient_id = %reading.patient_id,
                            predicted_bp = %body["data"]["predicted_bp"],
                            severity = %body["data"]["severity"],
                            "Reading accepted",
                        );
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Reading accepted but summary unreadable");
                    }
                }
            }
            Ok(response) => {
                tracing::warn!(
                    patient_id = %reading.patient_id,
                    status = %response.status(),
                    "Ingestion endpoint rejected reading",
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reach ingestion endpoint");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
