//! Command outcome types.
//!
//! An `Outcome` is the terminal result of one pipeline run: either a success
//! payload or a typed error. It serializes to the wire shape operators see:
//! `{"success": true, "data": ..}` or `{"success": false, "error": {..}}`.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Error codes reported in failed outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No recognized input combination was supplied
    InvalidArgs,
    /// A remote read or list failed
    FetchFailed,
    /// The project listing came back empty
    NoProjectsFound,
    /// The screen listing for a project came back empty
    NoScreensFound,
    /// A remote tool invocation failed
    ToolExecutionFailed,
    /// A local virtual tool override failed
    VirtualToolFailed,
    /// Two included routes share a path
    DuplicateRoutes,
    /// Writing an output file failed
    WriteFailed,
    /// The named tool is neither virtual nor offered by the server
    UnknownTool,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgs => "INVALID_ARGS",
            ErrorCode::FetchFailed => "FETCH_FAILED",
            ErrorCode::NoProjectsFound => "NO_PROJECTS_FOUND",
            ErrorCode::NoScreensFound => "NO_SCREENS_FOUND",
            ErrorCode::ToolExecutionFailed => "TOOL_EXECUTION_FAILED",
            ErrorCode::VirtualToolFailed => "VIRTUAL_TOOL_FAILED",
            ErrorCode::DuplicateRoutes => "DUPLICATE_ROUTES",
            ErrorCode::WriteFailed => "WRITE_FAILED",
            ErrorCode::UnknownTool => "UNKNOWN_TOOL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error half of a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeError {
    pub code: ErrorCode,
    pub message: String,
    /// Retry guidance. No producer in this crate sets it yet.
    #[serde(default)]
    pub recoverable: bool,
}

impl OutcomeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            recoverable: false,
        }
    }

    /// Mark this error as worth retrying.
    pub fn with_recoverable(mut self, recoverable: bool) -> Self {
        self.recoverable = recoverable;
        self
    }
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Terminal result of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T = Value> {
    Success(T),
    Failure(OutcomeError),
}

impl<T> Outcome<T> {
    pub fn success(data: T) -> Self {
        Outcome::Success(data)
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Outcome::Failure(OutcomeError::new(code, message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&OutcomeError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(data) => Outcome::Success(f(data)),
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Collapse a typed outcome into a JSON-valued one.
    pub fn into_value(self) -> Outcome<Value> {
        match self {
            Outcome::Success(data) => match serde_json::to_value(data) {
                Ok(value) => Outcome::Success(value),
                Err(e) => Outcome::failure(ErrorCode::WriteFailed, format!("Failed to serialize result: {}", e)),
            },
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Outcome::Failure(err) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", err)?;
            }
        }
        state.end()
    }
}
