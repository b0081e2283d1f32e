//! execute_tool step - Run the named tool, locally when a virtual tool claims it

use async_trait::async_trait;

use crate::domain::ErrorCode;
use crate::pipeline::{ExecutionContext, Step};

/// Prefix marking failures raised by local overrides
pub const VIRTUAL_FAILURE_PREFIX: &str = "Virtual tool execution failed";

pub struct ExecuteToolStep;

#[async_trait]
impl Step for ExecuteToolStep {
    fn name(&self) -> &'static str {
        "execute_tool"
    }

    fn should_run(&self, ctx: &ExecutionContext) -> bool {
        ctx.parsed_args.is_some() && !ctx.has_result()
    }

    async fn run(&self, ctx: &mut ExecutionContext) {
        let Some(name) = ctx.input.tool_name.clone() else {
            ctx.fail(ErrorCode::InvalidArgs, "No tool name supplied");
            return;
        };
        let args = ctx.parsed_args.clone().unwrap_or_default();

        if let Some(tool) = ctx.virtual_tools.find(&name).cloned() {
            log::info!("Running virtual tool {}", name);
            match tool.execute(ctx.client.as_ref(), &args).await {
                Ok(value) => ctx.succeed(value),
                Err(e) => {
                    log::warn!("Virtual tool {} failed: {:#}", name, e);
                    ctx.fail(ErrorCode::VirtualToolFailed, format!("{}: {:#}", VIRTUAL_FAILURE_PREFIX, e))
                }
            };
            return;
        }

        log::info!("Invoking remote tool {}", name);
        match ctx.client.invoke(&name, &args).await {
            Ok(value) => ctx.succeed(value),
            Err(e) => {
                log::warn!("Remote tool {} failed: {}", name, e);
                ctx.fail(ErrorCode::ToolExecutionFailed, format!("Tool '{}' failed: {}", name, e))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{MockRemoteClient, RemoteClient, ToolArgs};
    use crate::pipeline::ToolCommandInput;
    use crate::pipeline::steps::test_support::context_with;
    use crate::tools::{VirtualTool, VirtualToolRegistry};
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct Failing;

    #[async_trait]
    impl VirtualTool for Failing {
        fn name(&self) -> &str {
            "create_screen"
        }

        async fn execute(&self, _client: &dyn RemoteClient, _args: &ToolArgs) -> Result<Value, eyre::Error> {
            Err(eyre::eyre!("boom"))
        }
    }

    struct EchoArgs;

    #[async_trait]
    impl VirtualTool for EchoArgs {
        fn name(&self) -> &str {
            "echo"
        }

        async fn execute(&self, _client: &dyn RemoteClient, args: &ToolArgs) -> Result<Value, eyre::Error> {
            Ok(Value::Object(args.clone()))
        }
    }

    fn args() -> ToolArgs {
        let mut args = ToolArgs::new();
        args.insert("title".into(), json!("Test"));
        args
    }

    #[test]
    fn test_waits_for_parsed_args() {
        let mock = Arc::new(MockRemoteClient::new());
        let unresolved = context_with(ToolCommandInput::for_tool("x"), mock.clone(), VirtualToolRegistry::new());
        let resolved =
            context_with(ToolCommandInput::for_tool("x"), mock, VirtualToolRegistry::new()).with_parsed_args(args());
        assert!(!ExecuteToolStep.should_run(&unresolved));
        assert!(ExecuteToolStep.should_run(&resolved));
    }

    #[tokio::test]
    async fn test_virtual_receives_args() {
        let mock = Arc::new(MockRemoteClient::new());
        let mut ctx = context_with(
            ToolCommandInput::for_tool("echo"),
            mock.clone(),
            VirtualToolRegistry::new().with_tool(Arc::new(EchoArgs)),
        )
        .with_parsed_args(args());

        ExecuteToolStep.run(&mut ctx).await;

        assert_eq!(ctx.result().unwrap().data().unwrap(), &json!({"title": "Test"}));
        assert!(mock.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_virtual_failure_is_prefixed() {
        let mock = Arc::new(MockRemoteClient::new().with_tool_response("create_screen", json!({})));
        let mut ctx = context_with(
            ToolCommandInput::for_tool("create_screen"),
            mock.clone(),
            VirtualToolRegistry::new().with_tool(Arc::new(Failing)),
        )
        .with_parsed_args(args());

        ExecuteToolStep.run(&mut ctx).await;

        let err = ctx.result().unwrap().error().unwrap();
        assert_eq!(err.code, ErrorCode::VirtualToolFailed);
        assert_eq!(err.message, "Virtual tool execution failed: boom");
        assert!(!err.recoverable);
        assert_eq!(mock.invocation_count("create_screen"), 0);
    }

    #[tokio::test]
    async fn test_remote_failure() {
        let mock = Arc::new(MockRemoteClient::new().with_tool_error("create_screen", "quota exceeded"));
        let mut ctx = context_with(ToolCommandInput::for_tool("create_screen"), mock, VirtualToolRegistry::new())
            .with_parsed_args(args());

        ExecuteToolStep.run(&mut ctx).await;

        let err = ctx.result().unwrap().error().unwrap();
        assert_eq!(err.code, ErrorCode::ToolExecutionFailed);
        assert!(err.message.contains("quota exceeded"));
        assert!(!err.message.starts_with(VIRTUAL_FAILURE_PREFIX));
        assert!(!err.recoverable);
    }

    #[tokio::test]
    async fn test_missing_tool_name() {
        let mock = Arc::new(MockRemoteClient::new());
        let mut ctx =
            context_with(ToolCommandInput::new(), mock, VirtualToolRegistry::new()).with_parsed_args(ToolArgs::new());

        ExecuteToolStep.run(&mut ctx).await;

        assert_eq!(ctx.result().unwrap().error().unwrap().code, ErrorCode::InvalidArgs);
    }
}
