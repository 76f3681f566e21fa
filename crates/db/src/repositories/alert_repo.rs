//! Repository for the `alerts` table.

use sqlx::PgPool;
use vitalwatch_core::alert::StoredAlert;

use crate::models::alert::AlertRow;

/// Column list for `alerts` queries.
const ALERT_COLUMNS: &str = "id, patient_id, severity, message, triggered_at";

/// Provides read/write operations for persisted alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert an alert row.
    pub async fn insert(pool: &PgPool, alert: &StoredAlert) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO alerts (patient_id, severity, message, triggered_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&alert.patient_id)
        .bind(alert.severity.as_str())
        .bind(&alert.message)
        .bind(alert.triggered_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List recent alerts, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<AlertRow>, sqlx::Error> {
        let query =
            format!("SELECT {ALERT_COLUMNS} FROM alerts ORDER BY triggered_at DESC LIMIT $1");
        sqlx::query_as::<_, AlertRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
