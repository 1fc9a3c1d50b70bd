//! Inference Service - extraction, classification and fallback policy
//!
//! Branches per request:
//! - no records           → empty-input fallback, classifier untouched
//! - records, model ready → model-backed prediction
//! - records, no model    → no-model fallback
//!
//! Parameters are owned here behind an `Arc` and only ever read, so one
//! service instance is shared across all requests without locking.

use std::sync::Arc;

use super::classifier::{classify, LabelMap, DEFAULT_LABEL};
use super::error::ModelError;
use super::features::{extract_features, idx, FeatureVector};
use super::params::{ModelInfo, ModelParameters};
use crate::models::{ActivityRecord, InsightMetrics, InsightResult, ModelVersion};

/// Placeholder consistency score reported for every record-backed result
pub const CONSISTENCY_SCORE_PLACEHOLDER: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct InferenceService {
    params: Option<Arc<ModelParameters>>,
    labels: LabelMap,
}

impl InferenceService {
    pub fn new(params: Option<ModelParameters>) -> Self {
        Self {
            params: params.map(Arc::new),
            labels: LabelMap::default(),
        }
    }

    /// Build from a load outcome, degrading to no-model mode on failure.
    pub fn from_load_result(result: Result<ModelParameters, ModelError>) -> Self {
        match result {
            Ok(params) => Self::new(Some(params)),
            Err(e) => {
                tracing::warn!("Failed to load model: {}", e);
                tracing::warn!("Service will run with no-model fallback predictions");
                Self::new(None)
            }
        }
    }

    pub fn is_model_loaded(&self) -> bool {
        self.params.is_some()
    }

    pub fn model_info(&self) -> Option<ModelInfo> {
        self.params.as_ref().map(|p| p.info())
    }

    /// Version tag describing how record-backed requests are answered
    pub fn serving_version(&self) -> ModelVersion {
        if self.is_model_loaded() {
            ModelVersion::ModelBacked
        } else {
            ModelVersion::NoModelFallback
        }
    }

    /// Produce the insight for one learner's records.
    pub fn insight(&self, records: &[ActivityRecord]) -> Result<InsightResult, ModelError> {
        if records.is_empty() {
            return Ok(InsightResult {
                label: DEFAULT_LABEL.to_string(),
                cluster_index: None,
                metrics: InsightMetrics::default(),
                model_version: ModelVersion::EmptyInputFallback,
            });
        }

        let features = extract_features(records);
        tracing::debug!("Calculated features: {:?}", features.named());

        let (label, cluster_index, model_version) = match self.params.as_deref() {
            Some(params) => {
                let result = classify(&features, Some(params), &self.labels)?;
                tracing::debug!(
                    "Predicted style: {} (cluster {}, distance {:.4})",
                    result.label, result.cluster_index, result.distance
                );
                (result.label, Some(result.cluster_index), ModelVersion::ModelBacked)
            }
            None => {
                tracing::debug!("Model not loaded, using fallback label");
                (DEFAULT_LABEL, None, ModelVersion::NoModelFallback)
            }
        };

        Ok(InsightResult {
            label: label.to_string(),
            cluster_index,
            metrics: display_metrics(&features, records.len()),
            model_version,
        })
    }
}

/// Display metrics read back from the feature vector.
pub fn display_metrics(features: &FeatureVector, record_count: usize) -> InsightMetrics {
    let completion_rate = if record_count > 0 {
        round_to(features.values[idx::COMPLETED_COUNT] / record_count as f64, 2)
    } else {
        0.0
    };

    InsightMetrics {
        consistency_score: CONSISTENCY_SCORE_PLACEHOLDER,
        learning_speed: round_to(features.values[idx::AVG_MODULES_PER_DAY], 2),
        avg_module_time: round_to(features.values[idx::AVG_DURATION_PER_MODULE], 1),
        completion_rate,
        avg_score: round_to(features.values[idx::AVG_SCORE], 1),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::layout::FEATURE_COUNT;
    use crate::ml::params::tests::identity_params;

    fn records() -> Vec<ActivityRecord> {
        vec![
            ActivityRecord::new("html", 80.0, 30.0, true).with_revisits(1),
            ActivityRecord::new("css", 67.25, 45.0, false),
        ]
    }

    #[test]
    fn test_empty_input_fallback() {
        let service = InferenceService::new(Some(identity_params(vec![vec![0.0; FEATURE_COUNT]])));
        let result = service.insight(&[]).unwrap();

        assert_eq!(result.label, "consistent_learner");
        assert_eq!(result.cluster_index, None);
        assert_eq!(result.metrics, InsightMetrics::default());
        assert_eq!(result.model_version, ModelVersion::EmptyInputFallback);
    }

    #[test]
    fn test_empty_input_fallback_without_model() {
        let result = InferenceService::new(None).insight(&[]).unwrap();
        assert_eq!(result.model_version, ModelVersion::EmptyInputFallback);
    }

    #[test]
    fn test_model_backed_prediction() {
        let service = InferenceService::new(Some(identity_params(vec![
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        ])));
        let records = vec![ActivityRecord::new("html", 80.0, 30.0, true).with_revisits(1)];

        let result = service.insight(&records).unwrap();
        assert_eq!(result.label, "fast_learner");
        assert_eq!(result.cluster_index, Some(0));
        assert_eq!(result.model_version, ModelVersion::ModelBacked);
        assert_eq!(result.metrics.avg_score, 80.0);
    }

    #[test]
    fn test_no_model_fallback() {
        let service = InferenceService::new(None);
        let result = service.insight(&records()).unwrap();

        assert_eq!(result.label, "consistent_learner");
        assert_eq!(result.cluster_index, None);
        assert_eq!(result.model_version, ModelVersion::NoModelFallback);
        // Metrics are computed regardless of which branch produced the label
        assert_eq!(result.metrics.avg_score, 73.6);
        assert_eq!(result.metrics.consistency_score, CONSISTENCY_SCORE_PLACEHOLDER);
    }

    #[test]
    fn test_metrics_independent_of_branch() {
        let with_model = InferenceService::new(Some(identity_params(vec![vec![0.0; FEATURE_COUNT]])));
        let without = InferenceService::new(None);

        assert_eq!(
            with_model.insight(&records()).unwrap().metrics,
            without.insight(&records()).unwrap().metrics,
        );
    }

    #[test]
    fn test_display_metrics_rounding() {
        let features = FeatureVector::from_values([1.0, 2.346, 12.36, 1.0, 66.66, 90.0, 40.0, 100.0, 1.0]);
        let metrics = display_metrics(&features, 3);

        assert_eq!(metrics.completion_rate, 0.33);
        assert_eq!(metrics.learning_speed, 2.35);
        assert_eq!(metrics.avg_module_time, 12.4);
        assert_eq!(metrics.avg_score, 66.7);
    }

    #[test]
    fn test_avg_score_ties_round_to_even() {
        let records: Vec<ActivityRecord> = [70.0, 71.0, 70.0, 70.0]
            .into_iter()
            .map(|score| ActivityRecord::new("m", score, 10.0, true))
            .collect();

        let result = InferenceService::new(None).insight(&records).unwrap();
        assert_eq!(result.metrics.avg_score, 70.2);

        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 1.0, 70.75, 71.0, 70.0, 40.0, 1.0]);
        assert_eq!(display_metrics(&features, 4).avg_score, 70.8);
    }

    #[test]
    fn test_from_load_result_degrades() {
        let service = InferenceService::from_load_result(Err(ModelError::format("bad")));
        assert!(!service.is_model_loaded());
        assert!(service.model_info().is_none());
        assert_eq!(service.serving_version(), ModelVersion::NoModelFallback);

        let service = InferenceService::from_load_result(Ok(identity_params(vec![vec![0.0; FEATURE_COUNT]])));
        assert!(service.is_model_loaded());
        assert_eq!(service.model_info().unwrap().cluster_count, 1);
    }
}
