//! In-memory remote client.
//!
//! Serves canned tool responses and resources and records every call, so
//! pipelines can be exercised without a server.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{ClientError, RemoteClient, ToolArgs};

/// Mock client for testing
#[derive(Default)]
pub struct MockRemoteClient {
    tool_responses: HashMap<String, Result<Value, String>>,
    resources: HashMap<String, Value>,
    tools: Vec<Value>,
    fail_connect: bool,
    fail_close: bool,
    fail_list: bool,
    connected: AtomicBool,
    connects: AtomicUsize,
    closes: AtomicUsize,
    invocations: Mutex<Vec<(String, ToolArgs)>>,
    reads: Mutex<Vec<String>>,
}

impl MockRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `name` with `value`
    pub fn with_tool_response(mut self, name: &str, value: Value) -> Self {
        self.tool_responses.insert(name.to_string(), Ok(value));
        self
    }

    /// Fail invocations of `name` with `message`
    pub fn with_tool_error(mut self, name: &str, message: &str) -> Self {
        self.tool_responses.insert(name.to_string(), Err(message.to_string()));
        self
    }

    /// Serve `value` for reads of `uri`
    pub fn with_resource(mut self, uri: &str, value: Value) -> Self {
        self.resources.insert(uri.to_string(), value);
        self
    }

    /// Advertise a remote tool in capabilities
    pub fn with_tool(mut self, name: &str, description: &str, input_schema: Value) -> Self {
        self.tools.push(json!({
            "name": name,
            "description": description,
            "inputSchema": input_schema,
        }));
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    /// Fail resource listing and capability fetches
    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    /// Every invoke call seen so far, in order
    pub fn invocations(&self) -> Vec<(String, ToolArgs)> {
        self.invocations.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of invoke calls for `name`
    pub fn invocation_count(&self, name: &str) -> usize {
        self.invocations().iter().filter(|(n, _)| n == name).count()
    }

    /// Every resource URI read so far, in order
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for MockRemoteClient {
    async fn connect(&self) -> Result<(), ClientError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(ClientError::InvalidResponse("mock connect failure".to_string()));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn invoke(&self, name: &str, args: &ToolArgs) -> Result<Value, ClientError> {
        self.invocations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((name.to_string(), args.clone()));

        match self.tool_responses.get(name) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(ClientError::ToolFailed(message.clone())),
            None => Err(ClientError::ToolFailed(format!(
                "No mock response configured for tool: {}",
                name
            ))),
        }
    }

    async fn read_resource(&self, uri: &str) -> Result<Value, ClientError> {
        self.reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(uri.to_string());

        self.resources.get(uri).cloned().ok_or_else(|| ClientError::Rpc {
            code: -32002,
            message: format!("Resource not found: {}", uri),
        })
    }

    async fn list_resources(&self) -> Result<Value, ClientError> {
        if self.fail_list {
            return Err(ClientError::InvalidResponse("mock list failure".to_string()));
        }
        let mut uris: Vec<&String> = self.resources.keys().collect();
        uris.sort();
        let resources: Vec<Value> = uris.into_iter().map(|uri| json!({ "uri": uri })).collect();
        Ok(json!({ "resources": resources }))
    }

    async fn get_capabilities(&self) -> Result<Value, ClientError> {
        if self.fail_list {
            return Err(ClientError::InvalidResponse("mock capabilities failure".to_string()));
        }
        Ok(json!({
            "server": { "tools": {}, "resources": {} },
            "tools": self.tools,
        }))
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.connected.store(false, Ordering::SeqCst);
        if self.fail_close {
            return Err(ClientError::InvalidResponse("mock close failure".to_string()));
        }
        Ok(())
    }
}
