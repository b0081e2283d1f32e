//! Step-based command execution
//!
//! A pipeline threads one `ExecutionContext` through an ordered list of
//! steps. Each step checks whether it applies, does its work, and may end
//! the run by setting the context's result. The tool command runs:
//! 1. list_tools (no tool named)
//! 2. show_schema (schema requested)
//! 3. parse_args (arguments unresolved)
//! 4. execute_tool (virtual override or remote invoke)

mod context;
mod input;
mod runner;
mod step;
pub mod steps;

pub use context::ExecutionContext;
pub use input::{OutputFormat, ToolCommandInput};
pub use runner::{Pipeline, PipelineError};
pub use step::Step;
