//! Remote Client Layer - the contract every command depends on
//!
//! This module provides:
//! - RemoteClient trait for the design service session lifecycle
//! - HttpRemoteClient, a JSON-RPC over HTTP implementation
//! - MockRemoteClient for tests and offline runs
//! - run_scoped, which guarantees the session is closed on every exit path

pub mod http;
pub mod mock;
pub mod session;

pub use http::{HttpClientConfig, HttpRemoteClient};
pub use mock::MockRemoteClient;
pub use session::{close_quietly, run_scoped};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Named arguments passed to a remote operation
pub type ToolArgs = Map<String, Value>;

/// Session with the remote design service.
///
/// Implementations own transport, authentication and retries. Methods take
/// `&self`; implementations keep session state behind interior mutability.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Open the session
    async fn connect(&self) -> Result<(), ClientError>;

    /// Invoke a named remote operation
    async fn invoke(&self, name: &str, args: &ToolArgs) -> Result<Value, ClientError>;

    /// Read a resource by URI
    async fn read_resource(&self, uri: &str) -> Result<Value, ClientError>;

    /// Enumerate available resources
    async fn list_resources(&self) -> Result<Value, ClientError>;

    /// Capability metadata, including the remote tool list
    async fn get_capabilities(&self) -> Result<Value, ClientError>;

    /// Close the session
    async fn close(&self) -> Result<(), ClientError>;
}

/// Text payload of a read resource.
///
/// Accepts a bare string or the `{"contents": [{"text": ..}]}` shape, joining
/// multiple text parts with newlines.
pub fn resource_text(value: &Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    let parts: Vec<&str> = value["contents"]
        .as_array()?
        .iter()
        .filter_map(|c| c["text"].as_str())
        .collect();
    if parts.is_empty() { None } else { Some(parts.join("\n")) }
}

/// Errors that can occur talking to the remote service
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Client is not connected")]
    NotConnected,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Tool failed: {0}")]
    ToolFailed(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
