use std::sync::Arc;

use vitalwatch_db::PatientStore;

use crate::config::ServerConfig;
use crate::ingest::IngestPipeline;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Patient state store (Postgres in production, in-memory without a
    /// database or in tests).
    pub store: Arc<dyn PatientStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (observer dashboards).
    pub ws_manager: Arc<WsManager>,
    /// The reading ingestion pipeline.
    pub pipeline: Arc<IngestPipeline>,
}
