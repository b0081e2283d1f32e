//! Step contract

use async_trait::async_trait;

use super::context::ExecutionContext;

/// A unit of pipeline work.
///
/// `should_run` must be a pure predicate over the context. `run` never
/// returns an error: faults are caught inside the step and recorded as a
/// failed outcome with `ctx.fail(..)`.
#[async_trait]
pub trait Step: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether this step applies to the current context
    fn should_run(&self, ctx: &ExecutionContext) -> bool;

    /// Do the work, mutating the context in place
    async fn run(&self, ctx: &mut ExecutionContext);
}
