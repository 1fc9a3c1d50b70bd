//! Error types for model loading and inference.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Container file does not exist at the resolved location.
    #[error("Model file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    /// Container exists but its groups or arrays are missing or malformed.
    #[error("Invalid model format: {0}")]
    Format(String),

    /// Classifier invoked without parameters.
    #[error("Model not loaded")]
    NotLoaded,
}

impl ModelError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let not_found = ModelError::NotFound { path: PathBuf::from("/tmp/missing.json") };
        assert_eq!(not_found.to_string(), "Model file not found at /tmp/missing.json");

        let format = ModelError::format("Group 'scaler' not found");
        assert_eq!(format.to_string(), "Invalid model format: Group 'scaler' not found");

        assert_eq!(ModelError::NotLoaded.to_string(), "Model not loaded");
    }
}
