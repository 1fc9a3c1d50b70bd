//! Learnytics ML Service
//!
//! Classifies a learner's recent activity into a learning style using a
//! pre-trained StandardScaler + KMeans model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    LEARNYTICS ML SERVICE                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────────────────────────────────┐  │
//! │  │  API      │──▶│  InferenceService (fallback policy)   │  │
//! │  │  (Axum)   │   │   features → scaler → nearest centroid│  │
//! │  └───────────┘   └──────────────────┬────────────────────┘  │
//! │                                     ▼                       │
//! │                      ┌──────────────────────────┐           │
//! │                      │ ModelParameters (Arc, RO)│           │
//! │                      └──────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod ml;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
use ml::InferenceService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InferenceService>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(service: InferenceService, config: config::Config) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::info::root))
        .route("/health", get(handlers::health::check))
        .route("/ml/model", get(handlers::info::model))
        .route("/ml/insight", post(handlers::insight::insight))
        .route("/ml/batch", post(handlers::insight::batch))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
