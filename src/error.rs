//! Error types for screenctl
//!
//! Centralized error handling using thiserror. Domain failures that a command
//! reports to the operator travel as `Outcome::Failure`, not through this type.

use thiserror::Error;

use crate::client::ClientError;
use crate::pipeline::PipelineError;

/// All error types that can occur in screenctl
#[derive(Debug, Error)]
pub enum ScreenctlError {
    /// Remote client error
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Pipeline design error
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for screenctl operations
pub type Result<T> = std::result::Result<T, ScreenctlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = ScreenctlError::Config("server.url must not be empty".to_string());
        assert_eq!(err.to_string(), "Config error: server.url must not be empty");
    }

    #[test]
    fn test_client_error_conversion() {
        let err: ScreenctlError = ClientError::NotConnected.into();
        assert!(matches!(err, ScreenctlError::Client(_)));
        assert_eq!(err.to_string(), "Client error: Client is not connected");
    }

    #[test]
    fn test_pipeline_error_conversion() {
        let err: ScreenctlError = PipelineError::NoResult { steps: 3 }.into();
        assert!(err.to_string().contains("no result"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScreenctlError = io_err.into();
        assert!(matches!(err, ScreenctlError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ScreenctlError = json_err.into();
        assert!(matches!(err, ScreenctlError::Json(_)));
    }
}
