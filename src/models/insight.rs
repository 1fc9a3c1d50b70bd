//! Insight request/response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::record::ActivityRecord;

/// Upper bound on users per batch request
pub const MAX_BATCH_USERS: u64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InsightRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[serde(default)]
    pub records: Option<Vec<ActivityRecord>>,
}

impl InsightRequest {
    pub fn records(&self) -> &[ActivityRecord] {
        self.records.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BatchRequest {
    #[validate(length(max = MAX_BATCH_USERS), nested)]
    pub users: Vec<InsightRequest>,
}

/// Which branch of the inference policy produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVersion {
    ModelBacked,
    NoModelFallback,
    EmptyInputFallback,
}

impl ModelVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVersion::ModelBacked => "model-backed",
            ModelVersion::NoModelFallback => "no-model-fallback",
            ModelVersion::EmptyInputFallback => "empty-input-fallback",
        }
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metrics derived from the feature vector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    pub consistency_score: f64,
    pub learning_speed: f64,
    pub avg_module_time: f64,
    pub completion_rate: f64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    pub label: String,
    #[serde(rename = "clusterIndex")]
    pub cluster_index: Option<usize>,
    pub metrics: InsightMetrics,
    pub model_version: ModelVersion,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchInsightResult {
    pub user_id: String,
    #[serde(flatten)]
    pub insight: InsightResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResponse {
    pub results: Vec<BatchInsightResult>,
    pub processed: usize,
    pub model_version: ModelVersion,
}
