//! Learning Style Classifier
//!
//! Standardize with the scaler parameters, then pick the nearest KMeans
//! centroid by Euclidean distance.
//! Input: FeatureVector, ModelParameters
//! Output: Classification

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::ModelError;
use super::features::FeatureVector;
use super::params::ModelParameters;

/// Label returned for any cluster the label table does not cover
pub const DEFAULT_LABEL: &str = "consistent_learner";

// ============================================================================
// LABEL MAP
// ============================================================================

/// Cluster index → learning style label.
///
/// Bundled with the classifier; the model container carries no labels.
#[derive(Debug, Clone)]
pub struct LabelMap {
    labels: BTreeMap<usize, &'static str>,
}

impl LabelMap {
    pub fn get(&self, cluster_index: usize) -> &'static str {
        self.labels.get(&cluster_index).copied().unwrap_or(DEFAULT_LABEL)
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            labels: BTreeMap::from([
                (0, "fast_learner"),
                (1, "consistent_learner"),
                (2, "reflective_learner"),
            ]),
        }
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub cluster_index: usize,
    pub label: &'static str,
    pub distance: f64,
}

/// Index of the closest centroid. Ties resolve to the lowest index.
pub fn nearest_centroid(params: &ModelParameters, features: &FeatureVector) -> (usize, f64) {
    let scaled = params.standardize(features);

    let mut best = (0, f64::INFINITY);
    for (i, centroid) in params.centroids().outer_iter().enumerate() {
        let distance = (&centroid - &scaled).mapv(|d| d * d).sum().sqrt();
        if distance < best.1 {
            best = (i, distance);
        }
    }

    best
}

/// Classify a feature vector.
///
/// `params` is `None` when the parameter store never initialised; that is a
/// caller bug, so it surfaces as `ModelError::NotLoaded` instead of a label.
pub fn classify(
    features: &FeatureVector,
    params: Option<&ModelParameters>,
    labels: &LabelMap,
) -> Result<Classification, ModelError> {
    let params = params.ok_or(ModelError::NotLoaded)?;

    let (cluster_index, distance) = nearest_centroid(params, features);

    Ok(Classification {
        cluster_index,
        label: labels.get(cluster_index),
        distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::layout::FEATURE_COUNT;
    use crate::ml::params::tests::identity_params;

    #[test]
    fn test_default_label_map() {
        let labels = LabelMap::default();
        assert_eq!(labels.get(0), "fast_learner");
        assert_eq!(labels.get(1), "consistent_learner");
        assert_eq!(labels.get(2), "reflective_learner");
        assert_eq!(labels.get(7), DEFAULT_LABEL);
    }

    #[test]
    fn test_single_centroid_scenario() {
        let params = identity_params(vec![vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]]);
        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 2.0, 80.0, 80.0, 80.0, 30.0, 1.0]);

        let result = classify(&features, Some(&params), &LabelMap::default()).unwrap();
        assert_eq!(result.cluster_index, 0);
        assert_eq!(result.label, "fast_learner");
    }

    #[test]
    fn test_picks_nearest_centroid() {
        // Scaled input here is [0,0,0,0,50,0,0,0,0]
        let params = identity_params(vec![
            vec![0.0; FEATURE_COUNT],
            vec![0.0, 0.0, 0.0, 0.0, 48.0, 0.0, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 0.0, 100.0, 0.0, 0.0, 0.0, 0.0],
        ]);
        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 1.0, 50.0, 0.0, 0.0, 0.0, 1.0]);

        let result = classify(&features, Some(&params), &LabelMap::default()).unwrap();
        assert_eq!(result.cluster_index, 1);
        assert_eq!(result.label, "consistent_learner");
        assert!((result.distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_resolves_to_lowest_index() {
        let mut low = vec![0.0; FEATURE_COUNT];
        low[4] = -1.0;
        let mut high = vec![0.0; FEATURE_COUNT];
        high[4] = 1.0;
        let params = identity_params(vec![vec![9.0; FEATURE_COUNT], high, low]);
        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let (index, _) = nearest_centroid(&params, &features);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_deterministic_repeated_calls() {
        let params = identity_params(vec![
            vec![0.3; FEATURE_COUNT],
            vec![-0.2; FEATURE_COUNT],
            vec![1.1; FEATURE_COUNT],
        ]);
        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 1.4, 0.6, 0.9, 0.2, 0.5, 1.3]);
        let labels = LabelMap::default();

        let first = classify(&features, Some(&params), &labels).unwrap();
        for _ in 0..50 {
            assert_eq!(classify(&features, Some(&params), &labels).unwrap(), first);
        }
    }

    #[test]
    fn test_unmapped_cluster_uses_default_label() {
        let mut far = vec![50.0; FEATURE_COUNT];
        far[0] = 100.0;
        let params = identity_params(vec![
            far.clone(),
            far.clone(),
            far,
            vec![0.0; FEATURE_COUNT],
        ]);
        let features = FeatureVector::from_values([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]);

        let result = classify(&features, Some(&params), &LabelMap::default()).unwrap();
        assert_eq!(result.cluster_index, 3);
        assert_eq!(result.label, DEFAULT_LABEL);
    }

    #[test]
    fn test_missing_params_is_not_loaded() {
        let result = classify(&FeatureVector::zeros(), None, &LabelMap::default());
        assert!(matches!(result, Err(ModelError::NotLoaded)));
    }
}
