//! `vitalwatch-agent` -- simulated monitoring device.
//!
//! Stands in for a bedside sensor unit: generates plausible vitals for
//! one patient and pushes them to the Vitalwatch backend on a fixed
//! interval.
//!
//! # Environment variables
//!
//! | Variable                | Required | Default                 | Description                          |
//! |-------------------------|----------|-------------------------|--------------------------------------|
//! | `API_URL`               | no       | `http://127.0.0.1:3000` | Backend base URL                     |
//! | `PATIENT_ID`            | yes      | --                      | Patient this device reports for      |
//! | `READING_INTERVAL_SECS` | no       | `5`                     | Seconds between readings             |

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalwatch_agent::sender;
use vitalwatch_agent::vitals::VitalsSimulator;

/// Default interval between reading pushes.
const DEFAULT_INTERVAL_SECS: u64 = 5;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitalwatch_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".into());

    let patient_id = std::env::var("PATIENT_ID").unwrap_or_else(|_| {
        tracing::error!("PATIENT_ID environment variable is required");
        std::process::exit(1);
    });

    let interval_secs: u64 = std::env::var("READING_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_INTERVAL_SECS);

    let interval = Duration::from_secs(interval_secs);

    tracing::info!(
        patient_id = %patient_id,
        api_url = %api_url,
        interval_secs,
        "Starting vitalwatch-agent",
    );

    let simulator = VitalsSimulator::new(patient_id);
    sender::run(&api_url, &simulator, interval).await;
}
