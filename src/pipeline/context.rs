//! Execution context - mutable state threaded through one pipeline run

use std::sync::Arc;

use serde_json::Value;

use super::input::ToolCommandInput;
use crate::client::{RemoteClient, ToolArgs};
use crate::domain::{ErrorCode, Outcome};
use crate::tools::VirtualToolRegistry;

/// State shared by the steps of one pipeline run.
///
/// Owned by exactly one run. `result` is write-once: the first outcome set
/// sticks and later attempts are ignored.
pub struct ExecutionContext {
    pub input: ToolCommandInput,
    pub client: Arc<dyn RemoteClient>,
    pub virtual_tools: VirtualToolRegistry,
    /// Resolved tool arguments, `None` until a step parses them
    pub parsed_args: Option<ToolArgs>,
    result: Option<Outcome>,
}

impl ExecutionContext {
    pub fn new(input: ToolCommandInput, client: Arc<dyn RemoteClient>, virtual_tools: VirtualToolRegistry) -> Self {
        Self {
            input,
            client,
            virtual_tools,
            parsed_args: None,
            result: None,
        }
    }

    /// Preset the arguments, skipping argument parsing
    pub fn with_parsed_args(mut self, args: ToolArgs) -> Self {
        self.parsed_args = Some(args);
        self
    }

    pub fn result(&self) -> Option<&Outcome> {
        self.result.as_ref()
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    /// Set the terminal outcome. Returns false if one was already set.
    pub fn set_result(&mut self, outcome: Outcome) -> bool {
        if self.result.is_some() {
            log::warn!("Ignoring second result for pipeline run");
            return false;
        }
        self.result = Some(outcome);
        true
    }

    pub fn succeed(&mut self, data: Value) -> bool {
        self.set_result(Outcome::success(data))
    }

    pub fn fail(&mut self, code: ErrorCode, message: impl Into<String>) -> bool {
        self.set_result(Outcome::failure(code, message))
    }

    pub fn into_result(self) -> Option<Outcome> {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRemoteClient;
    use serde_json::json;

    fn context() -> ExecutionContext {
        ExecutionContext::new(
            ToolCommandInput::for_tool("list_projects"),
            Arc::new(MockRemoteClient::new()),
            VirtualToolRegistry::new(),
        )
    }

    #[test]
    fn test_new_context_is_empty() {
        let ctx = context();
        assert!(ctx.parsed_args.is_none());
        assert!(!ctx.has_result());
    }

    #[test]
    fn test_result_is_write_once() {
        let mut ctx = context();
        assert!(ctx.succeed(json!(1)));
        assert!(!ctx.fail(ErrorCode::FetchFailed, "late"));
        assert_eq!(ctx.result(), Some(&Outcome::success(json!(1))));
    }

    #[test]
    fn test_with_parsed_args() {
        let mut args = ToolArgs::new();
        args.insert("title".into(), json!("Test"));
        let ctx = context().with_parsed_args(args.clone());
        assert_eq!(ctx.parsed_args, Some(args));
    }

    #[test]
    fn test_into_result() {
        let mut ctx = context();
        ctx.fail(ErrorCode::InvalidArgs, "bad");
        let outcome = ctx.into_result().unwrap();
        assert_eq!(outcome.error().unwrap().code, ErrorCode::InvalidArgs);
    }
}
