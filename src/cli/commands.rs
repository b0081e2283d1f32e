//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - tool: list, describe or invoke a remote tool
//! - site: build or export a project's site
//! - view: fetch a resource
//! - projects: list projects

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use screenctl::pipeline::{OutputFormat, ToolCommandInput};
use screenctl::site::SiteInput;
use screenctl::view::ViewInput;

/// screenctl - Drive a remote screen design service from the terminal
#[derive(Parser, Debug)]
#[command(name = "screenctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tools, show a tool's schema, or invoke a tool
    Tool(ToolCommand),

    /// Build a static site from a project's screens
    Site(SiteCommand),

    /// Fetch a resource, screen or project
    View(ViewCommand),

    /// List projects
    Projects,
}

#[derive(Args, Debug, Clone)]
pub struct ToolCommand {
    /// Tool to invoke; omit to list available tools
    pub name: Option<String>,

    /// Print the tool's input schema
    #[arg(short, long)]
    pub schema: bool,

    /// Arguments as an inline JSON object
    #[arg(short, long)]
    pub data: Option<String>,

    /// Read arguments from a JSON file
    #[arg(long)]
    pub data_file: Option<PathBuf>,
}

impl ToolCommand {
    pub fn to_input(&self, output: OutputFormat) -> ToolCommandInput {
        ToolCommandInput {
            tool_name: self.name.clone(),
            show_schema: self.schema,
            data: self.data.clone(),
            data_file: self.data_file.clone(),
            output,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SiteCommand {
    /// Project whose screens become pages
    #[arg(short, long)]
    pub project_id: String,

    /// Directory receiving pages and the route table
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Write only the route table
    #[arg(short, long)]
    pub export: bool,
}

impl SiteCommand {
    pub fn to_input(&self) -> SiteInput {
        SiteInput::new(self.project_id.clone())
            .with_output_dir(self.output_dir.clone())
            .with_export(self.export)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ViewCommand {
    /// List all resources
    #[arg(short, long)]
    pub list: bool,

    /// Resource name to read
    #[arg(short, long)]
    pub name: Option<String>,

    /// Source screen resource to read
    #[arg(long)]
    pub source_screen: Option<String>,

    /// Project to fetch
    #[arg(short, long)]
    pub project_id: Option<String>,

    /// Screen within the project
    #[arg(short, long)]
    pub screen_id: Option<String>,
}

impl ViewCommand {
    pub fn to_input(&self) -> ViewInput {
        ViewInput {
            list: self.list,
            name: self.name.clone(),
            source_screen: self.source_screen.clone(),
            project_id: self.project_id.clone(),
            screen_id: self.screen_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    impl Commands {
        fn tool(self) -> ToolCommand {
            match self {
                Commands::Tool(cmd) => cmd,
                other => panic!("Expected Tool command, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["screenctl"]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["screenctl", "-v", "projects"]).unwrap();
        assert!(cli.is_verbose());
        assert!(matches!(cli.command, Commands::Projects));
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["screenctl", "projects", "-c", "/path/to/config.yml"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/config.yml")));
    }

    #[test]
    fn test_tool_list() {
        let cli = Cli::try_parse_from(["screenctl", "tool"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Pretty);
        let input = cli.command.tool().to_input(OutputFormat::Pretty);
        assert!(input.tool_name.is_none());
        assert!(!input.show_schema);
    }

    #[test]
    fn test_tool_invoke() {
        let cli = Cli::try_parse_from([
            "screenctl",
            "tool",
            "create_screen",
            "--data",
            r#"{"title":"Test"}"#,
            "--output",
            "raw",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Raw);
        let input = cli.command.tool().to_input(OutputFormat::Raw);
        assert_eq!(input.tool_name.as_deref(), Some("create_screen"));
        assert_eq!(input.data.as_deref(), Some(r#"{"title":"Test"}"#));
        assert_eq!(input.output, OutputFormat::Raw);
    }

    #[test]
    fn test_tool_schema_and_file() {
        let cli = Cli::try_parse_from(["screenctl", "tool", "get_screen", "--schema", "--data-file", "args.json"]).unwrap();
        let tool = cli.command.tool();
        assert!(tool.schema);
        assert_eq!(tool.data_file, Some(PathBuf::from("args.json")));
    }

    #[test]
    fn test_invalid_output() {
        assert!(Cli::try_parse_from(["screenctl", "tool", "--output", "yaml"]).is_err());
    }

    #[test]
    fn test_site_command() {
        let cli = Cli::try_parse_from(["screenctl", "site", "--project-id", "p1", "--export"]).unwrap();
        match cli.command {
            Commands::Site(cmd) => {
                let input = cmd.to_input();
                assert_eq!(input.project_id, "p1");
                assert!(input.export);
                assert_eq!(input.output_dir, PathBuf::from("."));
            }
            other => panic!("Expected Site command, got {:?}", other),
        }
    }

    #[test]
    fn test_site_requires_project() {
        assert!(Cli::try_parse_from(["screenctl", "site"]).is_err());
    }

    #[test]
    fn test_view_command() {
        let cli = Cli::try_parse_from(["screenctl", "view", "--project-id", "1", "--screen-id", "2"]).unwrap();
        match cli.command {
            Commands::View(cmd) => {
                let input = cmd.to_input();
                assert_eq!(input.project_id.as_deref(), Some("1"));
                assert_eq!(input.screen_id.as_deref(), Some("2"));
                assert!(!input.list);
            }
            other => panic!("Expected View command, got {:?}", other),
        }
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["screenctl", "--version"]);
        assert!(result.is_err());
    }
}
