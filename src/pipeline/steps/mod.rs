//! Steps of the tool invocation pipeline

mod execute_tool;
mod list_tools;
mod parse_args;
mod show_schema;

pub use execute_tool::{ExecuteToolStep, VIRTUAL_FAILURE_PREFIX};
pub use list_tools::ListToolsStep;
pub use parse_args::ParseArgsStep;
pub use show_schema::ShowSchemaStep;

use serde_json::Value;

/// Remote tool entries from a capabilities document
pub(crate) fn remote_tools(capabilities: &Value) -> Vec<Value> {
    capabilities["tools"].as_array().cloned().unwrap_or_default()
}
