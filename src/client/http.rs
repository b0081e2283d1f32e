//! JSON-RPC over HTTP remote client
//!
//! Talks to the design service's tool server: every request is a JSON-RPC 2.0
//! POST to a single endpoint. The server may pin a session via the
//! `Mcp-Session-Id` header, which is echoed on every later request and used
//! to end the session on close.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use super::{ClientError, RemoteClient, ToolArgs};

/// Session header issued by the server
const SESSION_HEADER: &str = "mcp-session-id";

/// Protocol revision announced during initialize
const PROTOCOL_VERSION: &str = "2025-03-26";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl HttpClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Remote client speaking JSON-RPC over HTTP
pub struct HttpRemoteClient {
    http: Client,
    config: HttpClientConfig,
    session_id: Mutex<Option<String>>,
    server_capabilities: Mutex<Option<Value>>,
    next_id: AtomicU64,
    connected: AtomicBool,
}

impl HttpRemoteClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            config,
            session_id: Mutex::new(None),
            server_capabilities: Mutex::new(None),
            next_id: AtomicU64::new(1),
            connected: AtomicBool::new(false),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn ensure_connected(&self) -> Result<(), ClientError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(ClientError::NotConnected)
        }
    }

    /// Base request with auth and session headers applied
    async fn builder(&self, method: Method) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, &self.config.url)
            .header(ACCEPT, "application/json, text/event-stream");

        if let Some(key) = &self.config.api_key {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", key));
        }
        if let Some(session) = self.session_id.lock().await.as_deref() {
            builder = builder.header(SESSION_HEADER, session);
        }
        builder
    }

    /// Send one JSON-RPC request and return its `result`
    async fn call(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        log::debug!("-> {} (id {})", method, id);
        let response = self.builder(Method::POST).await.json(&body).send().await?;

        if let Some(session) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            *self.session_id.lock().await = Some(session.to_string());
        }

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let envelope = parse_body(&text, &content_type)?;
        log::debug!("<- {} (id {})", method, id);
        unwrap_rpc(envelope)
    }

    /// Send a JSON-RPC notification; the server sends no result
    async fn notify(&self, method: &str) -> Result<(), ClientError> {
        let body = json!({ "jsonrpc": "2.0", "method": method });
        let response = self.builder(Method::POST).await.json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn connect(&self) -> Result<(), ClientError> {
        let result = self
            .call(
                "initialize",
                json!({
                    "protocolVersion": PROTOCOL_VERSION,
                    "capabilities": {},
                    "clientInfo": {
                        "name": env!("CARGO_PKG_NAME"),
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                }),
            )
            .await?;

        *self.server_capabilities.lock().await = Some(result.get("capabilities").cloned().unwrap_or(Value::Null));
        self.connected.store(true, Ordering::SeqCst);
        self.notify("notifications/initialized").await?;

        log::info!("Connected to {}", self.config.url);
        Ok(())
    }

    async fn invoke(&self, name: &str, args: &ToolArgs) -> Result<Value, ClientError> {
        self.ensure_connected()?;
        let result = self
            .call("tools/call", json!({ "name": name, "arguments": args }))
            .await?;
        tool_result_value(result)
    }

    async fn read_resource(&self, uri: &str) -> Result<Value, ClientError> {
        self.ensure_connected()?;
        self.call("resources/read", json!({ "uri": uri })).await
    }

    async fn list_resources(&self) -> Result<Value, ClientError> {
        self.ensure_connected()?;
        self.call("resources/list", json!({})).await
    }

    async fn get_capabilities(&self) -> Result<Value, ClientError> {
        self.ensure_connected()?;
        let tools = self.call("tools/list", json!({})).await?;
        let server = self.server_capabilities.lock().await.clone().unwrap_or(Value::Null);
        Ok(json!({
            "server": server,
            "tools": tools.get("tools").cloned().unwrap_or_else(|| json!([])),
        }))
    }

    async fn close(&self) -> Result<(), ClientError> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        let has_session = self.session_id.lock().await.is_some();
        if has_session {
            let response = self.builder(Method::DELETE).await.send().await?;
            let status = response.status();
            // Servers that do not support explicit termination answer 405
            if !status.is_success() && status.as_u16() != 405 {
                return Err(ClientError::Http {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }
        }
        *self.session_id.lock().await = None;
        log::info!("Disconnected from {}", self.config.url);
        Ok(())
    }
}

/// Decode a response body, which is plain JSON or an event stream whose
/// last `data:` line carries the JSON-RPC message.
pub(crate) fn parse_body(text: &str, content_type: &str) -> Result<Value, ClientError> {
    if content_type.starts_with("text/event-stream") {
        let data = text
            .lines()
            .filter_map(|line| line.strip_prefix("data:"))
            .map(str::trim)
            .filter(|data| !data.is_empty())
            .last()
            .ok_or_else(|| ClientError::InvalidResponse("Event stream carried no data".to_string()))?;
        return Ok(serde_json::from_str(data)?);
    }
    Ok(serde_json::from_str(text)?)
}

/// Extract `result` from a JSON-RPC envelope, mapping `error` to `ClientError::Rpc`.
pub(crate) fn unwrap_rpc(envelope: Value) -> Result<Value, ClientError> {
    if let Some(error) = envelope.get("error") {
        return Err(ClientError::Rpc {
            code: error["code"].as_i64().unwrap_or(-32603),
            message: error["message"].as_str().unwrap_or("Unknown error").to_string(),
        });
    }
    envelope
        .get("result")
        .cloned()
        .ok_or_else(|| ClientError::InvalidResponse("Response has neither result nor error".to_string()))
}

/// Turn a `tools/call` result into the tool's value.
///
/// Structured content wins; otherwise the text blocks are joined and parsed
/// as JSON when possible.
pub(crate) fn tool_result_value(result: Value) -> Result<Value, ClientError> {
    let text = result["content"]
        .as_array()
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b["text"].as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    if result["isError"].as_bool().unwrap_or(false) {
        let message = if text.is_empty() { "Tool reported an error".to_string() } else { text };
        return Err(ClientError::ToolFailed(message));
    }

    if let Some(structured) = result.get("structuredContent").filter(|v| !v.is_null()) {
        return Ok(structured.clone());
    }

    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
