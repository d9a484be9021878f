use invoice_actions::config::Settings;
use invoice_actions::observability::init_tracing;
use invoice_actions::services::{
    init_metrics, CredentialsProvider, Database, InMemoryViewCache, RouteNavigator,
};
use invoice_actions::startup::build_router;
use invoice_actions::AppState;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(&settings.log_level);
    init_metrics();

    let db = Database::new(
        &settings.database.url,
        settings.database.max_connections,
        settings.database.min_connections,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let state = AppState::new(
        Arc::new(db.clone()),
        Arc::new(InMemoryViewCache::new()),
        Arc::new(RouteNavigator),
        Arc::new(CredentialsProvider::new(db)),
    );

    let app = build_router(state);

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting invoice-actions on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
