//! Learnytics ML Service binary

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use learnytics_ml::{config, create_router, AppState};
use learnytics_ml::ml::{resolve_model_path, InferenceService, ModelParameters};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "learnytics_ml=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Learnytics ML Service starting ({})...", config.environment);

    // Parameters must be in place before the listener accepts requests
    let model_path = resolve_model_path(config.model_path.as_deref());
    let service = InferenceService::from_load_result(ModelParameters::load(&model_path));
    if service.is_model_loaded() {
        tracing::info!("Model loaded from {}", model_path.display());
    }

    let addr = config.socket_addr();
    let app = create_router(AppState::new(service, config));

    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
