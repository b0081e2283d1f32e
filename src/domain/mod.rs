//! Domain types for screenctl
//!
//! This module contains the core domain types:
//! - Outcome: terminal success/failure of a command, with typed error codes
//! - Screen, Project: resources fetched from the design service

pub mod outcome;
pub mod screen;

pub use outcome::{ErrorCode, Outcome, OutcomeError};
pub use screen::{Project, Screen, ScreenState, ScreenVersion};
