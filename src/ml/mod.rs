//! Learning style inference
//!
//! records → features → standardize → nearest centroid → label

pub mod layout;
pub mod error;
pub mod features;
pub mod params;
pub mod classifier;
pub mod service;

pub use error::ModelError;
pub use features::{extract_features, FeatureVector};
pub use params::{resolve_model_path, ModelInfo, ModelParameters};
pub use classifier::{classify, Classification, LabelMap};
pub use service::InferenceService;
