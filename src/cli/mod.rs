//! CLI module for screenctl - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for tool invocation,
//! site building, resource viewing and project listing.

pub mod commands;
pub mod output;

pub use commands::Cli;
