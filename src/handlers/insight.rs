//! Insight handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{
    InsightRequest, InsightResult,
    BatchRequest, BatchResponse, BatchInsightResult,
};

/// Classify one learner's records
pub async fn insight(
    State(state): State<AppState>,
    Json(req): Json<InsightRequest>,
) -> AppResult<Json<InsightResult>> {
    req.validate()?;

    let result = state.service.insight(req.records())?;

    tracing::info!(
        "Insight for {}: {} ({}, {} records)",
        req.user_id, result.label, result.model_version, req.records().len()
    );

    Ok(Json(result))
}

/// Classify several learners, each under the single-request policy
pub async fn batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> AppResult<Json<BatchResponse>> {
    req.validate()?;

    let results = req.users
        .into_iter()
        .map(|user| -> AppResult<BatchInsightResult> {
            let insight = state.service.insight(user.records())?;
            Ok(BatchInsightResult { user_id: user.user_id, insight })
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!("Batch processed: {} users", results.len());

    Ok(Json(BatchResponse {
        processed: results.len(),
        results,
        model_version: state.service.serving_version(),
    }))
}
