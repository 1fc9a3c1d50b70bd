//! Service and model info handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppState, AppResult, AppError};
use crate::ml::ModelInfo;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub model: &'static str,
    pub model_loaded: bool,
    pub environment: String,
}

/// Root endpoint with service info
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Learnytics ML Service",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
        model: "/ml/model",
        model_loaded: state.service.is_model_loaded(),
        environment: state.config.environment.clone(),
    })
}

/// Loaded parameter summary
pub async fn model(State(state): State<AppState>) -> AppResult<Json<ModelInfo>> {
    let info = state.service
        .model_info()
        .ok_or_else(|| AppError::NotFound("Model not loaded".to_string()))?;

    Ok(Json(info))
}
