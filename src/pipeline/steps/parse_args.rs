//! parse_args step - Resolve tool arguments from inline JSON or a file

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ToolArgs;
use crate::domain::ErrorCode;
use crate::pipeline::{ExecutionContext, Step};

pub struct ParseArgsStep;

impl ParseArgsStep {
    /// Parse a JSON object of arguments
    fn parse(text: &str, source: &str) -> Result<ToolArgs, String> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(format!("{} must be a JSON object, got {}", source, kind(&other))),
            Err(e) => Err(format!("Invalid JSON in {}: {}", source, e)),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl Step for ParseArgsStep {
    fn name(&self) -> &'static str {
        "parse_args"
    }

    fn should_run(&self, ctx: &ExecutionContext) -> bool {
        ctx.parsed_args.is_none()
    }

    async fn run(&self, ctx: &mut ExecutionContext) {
        let parsed = match (&ctx.input.data, &ctx.input.data_file) {
            (Some(_), Some(_)) => Err("Use either --data or --data-file, not both".to_string()),
            (Some(data), None) => Self::parse(data, "--data"),
            (None, Some(path)) => match tokio::fs::read_to_string(path).await {
                Ok(text) => Self::parse(&text, &path.display().to_string()),
                Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
            },
            (None, None) => Ok(ToolArgs::new()),
        };

        match parsed {
            Ok(args) => {
                log::debug!("Resolved {} tool arguments", args.len());
                ctx.parsed_args = Some(args);
            }
            Err(message) => {
                ctx.fail(ErrorCode::InvalidArgs, message);
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
    use crate::tools::VirtualToolRegistry;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn run_with(input: ToolCommandInput) -> ExecutionContext {
        let mut ctx = context_with(input, Arc::new(MockRemoteClient::new()), VirtualToolRegistry::new());
        ParseArgsStep.run(&mut ctx).await;
        ctx
    }

    #[tokio::test]
    async fn test_inline_data() {
        let ctx = run_with(ToolCommandInput::for_tool("t").with_data(r#"{"title": "Test"}"#)).await;
        assert_eq!(ctx.parsed_args.as_ref().unwrap()["title"], json!("Test"));
        assert!(!ctx.has_result());
    }

    #[tokio::test]
    async fn test_no_data_is_empty_object() {
        let ctx = run_with(ToolCommandInput::for_tool("t")).await;
        assert_eq!(ctx.parsed_args, Some(ToolArgs::new()));
    }

    #[tokio::test]
    async fn test_data_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("args.json");
        std::fs::write(&path, r#"{"projectId": "p1"}"#).unwrap();

        let ctx = run_with(ToolCommandInput::for_tool("t").with_data_file(&path)).await;
        assert_eq!(ctx.parsed_args.unwrap()["projectId"], json!("p1"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let ctx = run_with(ToolCommandInput::for_tool("t").with_data_file("/nonexistent/args.json")).await;
        let err = ctx.result().unwrap().error().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidArgs);
        assert!(err.message.contains("Failed to read"));
        assert!(ctx.parsed_args.is_none());
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let ctx = run_with(ToolCommandInput::for_tool("t").with_data("{not json")).await;
        let err = ctx.result().unwrap().error().unwrap();
        assert_eq!(err.code, ErrorCode::InvalidArgs);
        assert!(err.message.starts_with("Invalid JSON in --data"));
    }

    #[tokio::test]
    async fn test_non_object() {
        let ctx = run_with(ToolCommandInput::for_tool("t").with_data("[1, 2]")).await;
        let err = ctx.result().unwrap().error().unwrap();
        assert_eq!(err.message, "--data must be a JSON object, got an array");
    }

    #[tokio::test]
    async fn test_both_sources_rejected() {
        let ctx = run_with(
            ToolCommandInput::for_tool("t")
                .with_data("{}")
                .with_data_file("args.json"),
        )
        .await;
        assert_eq!(ctx.result().unwrap().error().unwrap().code, ErrorCode::InvalidArgs);
    }

    #[test]
    fn test_skips_when_resolved() {
        let ctx = context_with(
            ToolCommandInput::for_tool("t"),
            Arc::new(MockRemoteClient::new()),
            VirtualToolRegistry::new(),
        )
        .with_parsed_args(ToolArgs::new());
        assert!(!ParseArgsStep.should_run(&ctx));
    }
}
