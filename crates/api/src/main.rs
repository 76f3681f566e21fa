use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalwatch_api::config::ServerConfig;
use vitalwatch_api::ingest::IngestPipeline;
use vitalwatch_api::{router, state, ws};
use vitalwatch_db::{MemoryPatientStore, PatientStore, PgPatientStore};
use vitalwatch_predict::{HttpBpModel, PredictionAdapter};

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitalwatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Patient state store ---
    // DATABASE_URL is optional: without it the server runs on the
    // in-memory store so dashboards still get live data.
    let store: Arc<dyn PatientStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = vitalwatch_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            vitalwatch_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            vitalwatch_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgPatientStore::new(pool))
        }
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set; using in-memory store, readings will not survive a restart"
            );
            Arc::new(MemoryPatientStore::new())
        }
    };

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Prediction adapter ---
    let model = Arc::new(HttpBpModel::new(config.ml_service_url.clone()));
    let adapter = PredictionAdapter::new(model);
    tracing::info!(url = %config.ml_service_url, "Prediction service configured");

    // --- Ingestion pipeline ---
    let pipeline = Arc::new(IngestPipeline::new(
        Arc::clone(&store),
        adapter,
        Arc::clone(&ws_manager),
    ));

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager,
        pipeline,
    };

    // --- Router ---
    let app = router::build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
