//! Feature Vector - classifier input built from activity records
//!
//! Positions follow `layout::FEATURE_LAYOUT`. Every aggregate is an
//! order-independent sum, mean or extremum, so record order never matters.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::models::ActivityRecord;

/// Index constants into the feature vector
pub mod idx {
    pub const COMPLETED_COUNT: usize = 0;
    pub const AVG_MODULES_PER_DAY: usize = 1;
    pub const AVG_DURATION_PER_MODULE: usize = 2;
    pub const AVG_REVISITS_PER_MODULE: usize = 3;
    pub const AVG_SCORE: usize = 4;
    pub const MAX_SCORE: usize = 5;
    pub const MIN_SCORE: usize = 6;
    pub const TOTAL_STUDY_DURATION: usize = 7;
    pub const AVG_SUBMISSION_RATIO: usize = 8;
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn zeros() -> Self {
        Self { values: [0.0; FEATURE_COUNT] }
    }

    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Named values for debug logging
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::zeros()
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract the 9 model features from a learner's records.
///
/// Positions 0-2 stay at 0.0 whatever the input: the trained scaler saw
/// zeros there, and computing real values would shift every prediction.
pub fn extract_features(records: &[ActivityRecord]) -> FeatureVector {
    if records.is_empty() {
        return FeatureVector::zeros();
    }

    let count = records.len() as f64;

    let mut score_sum = 0.0;
    let mut max_score = f64::NEG_INFINITY;
    let mut min_score = f64::INFINITY;
    let mut duration_sum = 0.0;
    let mut revisits_sum = 0.0;
    let mut ratio_sum = 0.0;

    for record in records {
        score_sum += record.score;
        max_score = max_score.max(record.score);
        min_score = min_score.min(record.score);
        duration_sum += record.duration_minutes;
        revisits_sum += record.revisits as f64;
        ratio_sum += record.submission_ratio;
    }

    let mut values = [0.0; FEATURE_COUNT];
    // First visit is implicit, so the baseline is 1.0
    values[idx::AVG_REVISITS_PER_MODULE] = 1.0 + revisits_sum / count;
    values[idx::AVG_SCORE] = score_sum / count;
    values[idx::MAX_SCORE] = max_score;
    values[idx::MIN_SCORE] = min_score;
    values[idx::TOTAL_STUDY_DURATION] = duration_sum;
    values[idx::AVG_SUBMISSION_RATIO] = ratio_sum / count;

    FeatureVector::from_values(values)
}
