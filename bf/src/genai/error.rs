//! Generation client error types

use thiserror::Error;

/// Errors that can occur while talking to the generation service
#[derive(Debug, Error)]
pub enum GenError {
    #[error("API key not configured. Set the {0} environment variable.")]
    MissingApiKey(String),

    #[error("The model did not return any content. It might be a restricted topic. Please try a different goal.")]
    EmptyResponse,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Configuration problems are fatal to every request, not just this one
    pub fn is_configuration(&self) -> bool {
        matches!(self, GenError::MissingApiKey(_))
    }
}
