//! Pipeline runner.
//!
//! Runs steps strictly in registration order, skipping those whose
//! `should_run` declines, and stops as soon as a step sets a result. A run
//! that exhausts its steps without a result is a wiring bug and is reported
//! as `PipelineError::NoResult`.

use super::context::ExecutionContext;
use super::step::Step;
use super::steps::{ExecuteToolStep, ListToolsStep, ParseArgsStep, ShowSchemaStep};
use crate::domain::Outcome;

/// Ordered, short-circuiting sequence of steps
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Step>>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// The tool invocation pipeline: list, schema, parse, execute
    pub fn tool_invocation() -> Self {
        Self::new()
            .add_step(ListToolsStep)
            .add_step(ShowSchemaStep)
            .add_step(ParseArgsStep)
            .add_step(ExecuteToolStep)
    }

    /// Append a step
    pub fn add_step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Append boxed steps
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = Box<dyn Step>>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the steps against `ctx`, returning it once a result is set.
    pub async fn run(&self, mut ctx: ExecutionContext) -> Result<ExecutionContext, PipelineError> {
        for step in &self.steps {
            if !step.should_run(&ctx) {
                tracing::debug!(step = step.name(), "Step skipped");
                continue;
            }

            tracing::debug!(step = step.name(), "Running step");
            step.run(&mut ctx).await;

            if ctx.has_result() {
                tracing::debug!(step = step.name(), "Pipeline finished");
                return Ok(ctx);
            }
        }

        log::error!("Pipeline ran {} steps without producing a result", self.steps.len());
        Err(PipelineError::NoResult {
            steps: self.steps.len(),
        })
    }

    /// Run and return the outcome
    pub async fn execute(&self, ctx: ExecutionContext) -> Result<Outcome, PipelineError> {
        let ctx = self.run(ctx).await?;
        ctx.into_result().ok_or(PipelineError::NoResult {
            steps: self.steps.len(),
        })
    }
}

/// Errors from the pipeline runner
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Pipeline produced no result after {steps} steps")]
    NoResult { steps: usize },
}
