//! Validated input of the tool command.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a command's outcome is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The full outcome as pretty JSON
    Json,
    /// Coloured headline plus the payload
    #[default]
    Pretty,
    /// Compact payload only
    Raw,
}

/// Input of a tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCommandInput {
    /// Remote operation to invoke; `None` lists the available tools
    pub tool_name: Option<String>,
    /// Print the tool's input schema instead of invoking it
    pub show_schema: bool,
    /// Arguments as an inline JSON object
    pub data: Option<String>,
    /// Arguments read from a JSON file
    pub data_file: Option<PathBuf>,
    pub output: OutputFormat,
}

impl ToolCommandInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_tool(name: impl Into<String>) -> Self {
        Self {
            tool_name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_schema(mut self, show_schema: bool) -> Self {
        self.show_schema = show_schema;
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }
}
