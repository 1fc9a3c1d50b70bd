//! Activity record model

use serde::{Deserialize, Deserializer, Serialize};

/// Revisits assumed when a record does not report any
pub const DEFAULT_REVISITS: i64 = 0;

/// Submission ratio assumed when a record does not report one
pub const DEFAULT_SUBMISSION_RATIO: f64 = 1.0;

/// One observed interaction with a learning module.
///
/// Optional wire fields are resolved to their defaults during deserialization,
/// so both a missing key and an explicit `null` yield the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub module: String,
    pub score: f64,
    pub duration_minutes: f64,
    /// Accepted but not used by feature extraction
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default = "default_revisits", deserialize_with = "revisits_or_default")]
    pub revisits: i64,
    #[serde(default = "default_submission_ratio", deserialize_with = "submission_ratio_or_default")]
    pub submission_ratio: f64,
}

impl ActivityRecord {
    pub fn new(module: impl Into<String>, score: f64, duration_minutes: f64, completed: bool) -> Self {
        Self {
            module: module.into(),
            score,
            duration_minutes,
            completed,
            date: None,
            revisits: DEFAULT_REVISITS,
            submission_ratio: DEFAULT_SUBMISSION_RATIO,
        }
    }

    pub fn with_revisits(mut self, revisits: i64) -> Self {
        self.revisits = revisits;
        self
    }

    pub fn with_submission_ratio(mut self, ratio: f64) -> Self {
        self.submission_ratio = ratio;
        self
    }
}

fn default_revisits() -> i64 {
    DEFAULT_REVISITS
}

fn default_submission_ratio() -> f64 {
    DEFAULT_SUBMISSION_RATIO
}

fn revisits_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_REVISITS))
}

fn submission_ratio_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_SUBMISSION_RATIO))
}
