//! Error types for the license monitor.

use thiserror::Error;

/// Errors that can abort a monitoring run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A required environment variable is absent or empty
    #[error("Missing required environment variable: {0}")]
    MissingConfig(String),

    /// A configuration value is present but unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream service returned a non-success status
    #[error("{source_name} returned {status}: {message}")]
    Api {
        source_name: &'static str,
        status: u16,
        message: String,
    },

    /// Local I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MonitorError {
    /// Build an [`MonitorError::Api`] from a failed response, consuming its body.
    pub(crate) async fn from_response(
        source_name: &'static str,
        response: reqwest::Response,
    ) -> Self {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Self::Api {
            source_name,
            status,
            message,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MonitorError>;
