use std::sync::Arc;

use acwr_coach::api::routes::create_routes;
use acwr_coach::config::{
    run_migrations, AppConfig, DatabaseConfig, HistoryBackend, RestStoreConfig,
};
use acwr_coach::services::TrainingLogService;
use acwr_coach::store::{HistoryStore, InMemoryHistoryStore, PgHistoryStore, RestHistoryStore};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let store = build_store(&config).await?;
    let training_log = TrainingLogService::new(store)
        .with_calorie_source(config.calorie_source)
        .with_history_limit(config.history_limit);

    info!(
        environment = %config.environment,
        backend = ?config.history_backend,
        calorie_source = ?config.calorie_source,
        history_limit = config.history_limit,
        "Configuration loaded"
    );

    let app = create_routes(training_log);

    let address = config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("ACWR coach server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn HistoryStore>> {
    let store: Arc<dyn HistoryStore> = match config.history_backend {
        HistoryBackend::Postgres => {
            let pool = DatabaseConfig::from_env()?.create_pool().await?;
            run_migrations(&pool).await?;
            Arc::new(PgHistoryStore::new(pool))
        }
        HistoryBackend::Rest => Arc::new(RestHistoryStore::new(&RestStoreConfig::from_env()?)?),
        HistoryBackend::Memory => {
            if config.is_production() {
                warn!("In-memory history store in production: workouts are lost on restart");
            }
            Arc::new(InMemoryHistoryStore::new())
        }
    };

    Ok(store)
}
