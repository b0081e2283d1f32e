//! Virtual tools - local overrides for remote operations
//!
//! A virtual tool carries the name of the remote operation it intercepts.
//! When a command invokes that name, the tool runs locally instead of the
//! remote call. Lookup is an ordered scan by exact name; the first
//! registered match wins.

mod build_site;
mod get_screen_code;

pub use build_site::BuildSiteTool;
pub use get_screen_code::GetScreenCodeTool;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::{RemoteClient, ToolArgs};
use crate::site::SiteBuilder;

/// A local override for a named remote operation
#[async_trait]
pub trait VirtualTool: Send + Sync {
    /// Name of the remote operation this tool replaces
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str {
        "Local override"
    }

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value {
        json!({ "type": "object" })
    }

    /// Run in place of the remote call
    async fn execute(&self, client: &dyn RemoteClient, args: &ToolArgs) -> Result<Value, eyre::Error>;
}

/// Ordered set of virtual tools
#[derive(Clone, Default)]
pub struct VirtualToolRegistry {
    tools: Vec<Arc<dyn VirtualTool>>,
}

impl VirtualToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in tools
    pub fn standard(site: SiteBuilder) -> Self {
        Self::new()
            .with_tool(Arc::new(GetScreenCodeTool))
            .with_tool(Arc::new(BuildSiteTool::new(site)))
    }

    /// Append a tool; earlier registrations shadow later ones with the same name
    pub fn with_tool(mut self, tool: Arc<dyn VirtualTool>) -> Self {
        self.register(tool);
        self
    }

    pub fn register(&mut self, tool: Arc<dyn VirtualTool>) {
        self.tools.push(tool);
    }

    /// First tool whose name matches exactly
    pub fn find(&self, name: &str) -> Option<&Arc<dyn VirtualTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Listing entries for every reachable tool, shadowed duplicates skipped
    pub fn definitions(&self) -> Vec<Value> {
        let mut seen: Vec<&str> = Vec::new();
        let mut defs = Vec::new();
        for tool in &self.tools {
            if seen.contains(&tool.name()) {
                continue;
            }
            seen.push(tool.name());
            defs.push(json!({
                "name": tool.name(),
                "description": tool.description(),
                "inputSchema": tool.input_schema(),
                "virtual": true,
            }));
        }
        defs
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Read a required string argument
pub(crate) fn required_str<'a>(args: &'a ToolArgs, key: &str) -> Result<&'a str, eyre::Error> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| eyre::eyre!("{} is required", key))
}
