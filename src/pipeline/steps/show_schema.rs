//! show_schema step - Report a tool's input schema instead of invoking it

use async_trait::async_trait;
use serde_json::json;

use super::remote_tools;
use crate::domain::ErrorCode;
use crate::pipeline::{ExecutionContext, Step};

pub struct ShowSchemaStep;

#[async_trait]
impl Step for ShowSchemaStep {
    fn name(&self) -> &'static str {
        "show_schema"
    }

    fn should_run(&self, ctx: &ExecutionContext) -> bool {
        ctx.input.show_schema && ctx.input.tool_name.is_some()
    }

    async fn run(&self, ctx: &mut ExecutionContext) {
        let name = ctx.input.tool_name.clone().unwrap_or_default();

        let virtual_schema = ctx.virtual_tools.find(&name).map(|tool| {
            json!({
                "name": tool.name(),
                "description": tool.description(),
                "inputSchema": tool.input_schema(),
                "virtual": true,
            })
        });
        if let Some(schema) = virtual_schema {
            ctx.succeed(schema);
            return;
        }

        let capabilities = match ctx.client.get_capabilities().await {
            Ok(caps) => caps,
            Err(e) => {
                ctx.fail(ErrorCode::FetchFailed, format!("Failed to fetch tool schema: {}", e));
                return;
            }
        };

        match remote_tools(&capabilities).into_iter().find(|t| t["name"] == name.as_str()) {
            Some(tool) => {
                ctx.succeed(json!({
                    "name": name,
                    "description": tool["description"],
                    "inputSchema": tool["inputSchema"],
                    "virtual": false,
                }));
            }
            None => {
                ctx.fail(ErrorCode::UnknownTool, format!("Unknown tool: {}", name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRemoteClient;
    use crate::pipeline::ToolCommandInput;
    use crate::pipeline::steps::test_support::context_with;
    use crate::site::SiteBuilder;
    use crate::tools::VirtualToolRegistry;
    use std::sync::Arc;

    #[test]
    fn test_requires_flag_and_name() {
        let mock = Arc::new(MockRemoteClient::new());
        let flagged = context_with(
            ToolCommandInput::for_tool("x").with_schema(true),
            mock.clone(),
            VirtualToolRegistry::new(),
        );
        let unflagged = context_with(ToolCommandInput::for_tool("x"), mock.clone(), VirtualToolRegistry::new());
        let unnamed = context_with(ToolCommandInput::new().with_schema(true), mock, VirtualToolRegistry::new());

        assert!(ShowSchemaStep.should_run(&flagged));
        assert!(!ShowSchemaStep.should_run(&unflagged));
        assert!(!ShowSchemaStep.should_run(&unnamed));
    }

    #[tokio::test]
    async fn test_remote_schema() {
        let schema = json!({"type": "object", "properties": {"title": {"type": "string"}}});
        let mock = Arc::new(MockRemoteClient::new().with_tool("create_screen", "Create a screen", schema.clone()));
        let mut ctx = context_with(
            ToolCommandInput::for_tool("create_screen").with_schema(true),
            mock.clone(),
            VirtualToolRegistry::new(),
        );

        ShowSchemaStep.run(&mut ctx).await;

        let data = ctx.result().unwrap().data().unwrap();
        assert_eq!(data["inputSchema"], schema);
        assert_eq!(data["virtual"], false);
        assert!(mock.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_virtual_schema_skips_remote() {
        let mock = Arc::new(MockRemoteClient::new().failing_list());
        let mut ctx = context_with(
            ToolCommandInput::for_tool("build_site").with_schema(true),
            mock,
            VirtualToolRegistry::standard(SiteBuilder::default()),
        );

        ShowSchemaStep.run(&mut ctx).await;

        let data = ctx.result().unwrap().data().unwrap();
        assert_eq!(data["virtual"], true);
        assert_eq!(data["inputSchema"]["required"][0], "projectId");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let mock = Arc::new(MockRemoteClient::new());
        let mut ctx = context_with(
            ToolCommandInput::for_tool("nope").with_schema(true),
            mock,
            VirtualToolRegistry::new(),
        );

        ShowSchemaStep.run(&mut ctx).await;

        assert_eq!(ctx.result().unwrap().error().unwrap().code, ErrorCode::UnknownTool);
    }
}
