//! Model Parameters - persisted scaler and KMeans state
//!
//! Loaded once at startup from the exported container and never mutated.
//! The container keeps the group/array names of the trained artifact:
//!
//! ```text
//! {
//!   "scaler": { "mean_": [..9], "scale_": [..9] },
//!   "kmeans": { "cluster_centers_": [[..9], ...] }
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::features::FeatureVector;
use super::layout::{LayoutInfo, FEATURE_COUNT};

/// Container file name looked up when no explicit path is configured
pub const DEFAULT_MODEL_FILE: &str = "learning_style_model.json";

// ============================================================================
// CONTAINER FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct ParameterContainer {
    scaler: Option<ScalerGroup>,
    kmeans: Option<KMeansGroup>,
}

#[derive(Debug, Deserialize)]
struct ScalerGroup {
    #[serde(rename = "mean_")]
    mean: Option<Vec<f64>>,
    #[serde(rename = "scale_")]
    scale: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct KMeansGroup {
    #[serde(rename = "cluster_centers_")]
    cluster_centers: Option<Vec<Vec<f64>>>,
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Summary of the loaded parameters for the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub cluster_count: usize,
    pub feature_count: usize,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ModelParameters {
    mean: Array1<f64>,
    scale: Array1<f64>,
    centroids: Array2<f64>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl ModelParameters {
    /// Build parameters from raw arrays, enforcing the shape invariants.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>, centroids: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        if mean.len() != FEATURE_COUNT {
            return Err(ModelError::format(format!(
                "scaler.mean_ has {} values, expected {}", mean.len(), FEATURE_COUNT
            )));
        }
        if scale.len() != FEATURE_COUNT {
            return Err(ModelError::format(format!(
                "scaler.scale_ has {} values, expected {}", scale.len(), FEATURE_COUNT
            )));
        }
        if let Some(j) = scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(ModelError::format(format!(
                "scaler.scale_[{}] must be finite and non-zero, got {}", j, scale[j]
            )));
        }
        if mean.iter().any(|m| !m.is_finite()) {
            return Err(ModelError::format("scaler.mean_ contains non-finite values"));
        }
        if centroids.is_empty() {
            return Err(ModelError::format("kmeans.cluster_centers_ is empty"));
        }

        let cluster_count = centroids.len();
        let mut flat = Vec::with_capacity(cluster_count * FEATURE_COUNT);
        for (i, row) in centroids.into_iter().enumerate() {
            if row.len() != FEATURE_COUNT {
                return Err(ModelError::format(format!(
                    "kmeans.cluster_centers_[{}] has {} values, expected {}", i, row.len(), FEATURE_COUNT
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(ModelError::format(format!(
                    "kmeans.cluster_centers_[{}] contains non-finite values", i
                )));
            }
            flat.extend(row);
        }

        let centroids = Array2::from_shape_vec((cluster_count, FEATURE_COUNT), flat)
            .map_err(|e| ModelError::format(format!("Centroid array error: {}", e)))?;

        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
            centroids,
            source: "<memory>".to_string(),
            loaded_at: Utc::now(),
        })
    }

    /// Load parameters from a container file
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading model parameters from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::NotFound { path: path.to_path_buf() });
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ModelError::format(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut params = Self::from_slice(&bytes)?;
        params.source = path.display().to_string();

        tracing::info!(
            "Model loaded: {} centroids x {} features",
            params.cluster_count(),
            FEATURE_COUNT
        );

        Ok(params)
    }

    /// Parse parameters from container bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let container: ParameterContainer = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::format(format!("Container is not valid JSON: {}", e)))?;

        let scaler = container.scaler
            .ok_or_else(|| ModelError::format("Group 'scaler' not found"))?;
        let kmeans = container.kmeans
            .ok_or_else(|| ModelError::format("Group 'kmeans' not found"))?;

        let mean = scaler.mean
            .ok_or_else(|| ModelError::format("Array 'scaler/mean_' not found"))?;
        let scale = scaler.scale
            .ok_or_else(|| ModelError::format("Array 'scaler/scale_' not found"))?;
        let centroids = kmeans.cluster_centers
            .ok_or_else(|| ModelError::format("Array 'kmeans/cluster_centers_' not found"))?;

        Self::new(mean, scale, centroids)
    }

    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }

    pub fn centroids(&self) -> &Array2<f64> {
        &self.centroids
    }

    pub fn cluster_count(&self) -> usize {
        self.centroids.nrows()
    }

    /// `(x - mean) / scale`, per feature
    pub fn standardize(&self, features: &FeatureVector) -> Array1<f64> {
        let x = ArrayView1::from(features.as_slice());
        (&x - &self.mean) / &self.scale
    }

    /// `scaled * scale + mean`, per feature
    pub fn inverse_transform(&self, scaled: &Array1<f64>) -> Array1<f64> {
        scaled * &self.scale + &self.mean
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            model_path: self.source.clone(),
            cluster_count: self.cluster_count(),
            feature_count: FEATURE_COUNT,
            layout: LayoutInfo::current(),
            loaded_at: self.loaded_at,
        }
    }
}

// ============================================================================
// PATH RESOLUTION
// ============================================================================

/// Resolve the container location.
///
/// An explicit path always wins. Otherwise the crate directory is tried
/// before the working directory; when neither exists the working-directory
/// candidate is returned so the loader reports it as missing.
pub fn resolve_model_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_MODEL_FILE);
    if bundled.exists() {
        return bundled;
    }

    PathBuf::from(DEFAULT_MODEL_FILE)
}
