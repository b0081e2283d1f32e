//! screenctl - A command-line client for a remote screen design service
//!
//! Commands run inside a scoped remote session. Tool invocations flow through
//! a step pipeline where local virtual tools can override remote operations.

pub mod app;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod projects;
pub mod site;
pub mod tools;
pub mod view;

pub use error::{Result, ScreenctlError};
