//! list_tools step - Enumerate remote and virtual tools when no tool is named

use async_trait::async_trait;
use serde_json::json;

use super::remote_tools;
use crate::domain::ErrorCode;
use crate::pipeline::{ExecutionContext, Step};

pub struct ListToolsStep;

#[async_trait]
impl Step for ListToolsStep {
    fn name(&self) -> &'static str {
        "list_tools"
    }

    fn should_run(&self, ctx: &ExecutionContext) -> bool {
        ctx.input.tool_name.is_none()
    }

    async fn run(&self, ctx: &mut ExecutionContext) {
        let capabilities = match ctx.client.get_capabilities().await {
            Ok(caps) => caps,
            Err(e) => {
                ctx.fail(ErrorCode::FetchFailed, format!("Failed to list tools: {}", e));
                return;
            }
        };

        let mut tools = ctx.virtual_tools.definitions();
        tools.extend(
            remote_tools(&capabilities)
                .into_iter()
                .filter(|t| !t["name"].as_str().is_some_and(|name| ctx.virtual_tools.contains(name))),
        );

        ctx.succeed(json!({ "tools": tools }));
    }
}
