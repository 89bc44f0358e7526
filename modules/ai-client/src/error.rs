//! Typed errors for completion calls.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// Bad or missing client setup (API key, header values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the endpoint.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status or an
    /// unusable payload shape.
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not decode.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for AiError {
    fn from(e: reqwest::Error) -> Self {
        AiError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for AiError {
    fn from(e: serde_json::Error) -> Self {
        AiError::Parse(e.to_string())
    }
}
