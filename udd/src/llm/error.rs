//! LLM error types

use thiserror::Error;

/// Errors that can occur during completion calls
///
/// The drafting pipeline never retries these; they propagate to the caller
/// (CLI or job store), which is responsible for surfacing them.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
