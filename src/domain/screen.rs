//! Remote resource shapes: projects, screens and their rendered versions.
//!
//! These mirror the JSON the design service returns. Unknown fields are
//! ignored so newer servers keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle of a screen in the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreenState {
    /// Still being generated or edited
    #[default]
    InProgress,
    /// Done and usable
    Finalized,
    /// Superseded, must not be published
    Obsolete,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

/// One rendering of a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenVersion {
    #[serde(default)]
    pub id: String,
    /// Resource URI of the rendered HTML
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

impl ScreenVersion {
    /// A version is usable when it points at rendered output.
    pub fn is_usable(&self) -> bool {
        self.download_url.as_deref().is_some_and(|url| !url.trim().is_empty())
    }
}

/// A screen belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    /// Full resource name, e.g. `projects/1/screens/abc`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: ScreenState,
    #[serde(default)]
    pub versions: Vec<ScreenVersion>,
}

impl Screen {
    /// Screen identifier, falling back to the last segment of the resource name.
    pub fn screen_id(&self) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => self.name.rsplit('/').next().unwrap_or_default().to_string(),
        }
    }

    /// Newest usable rendered version, if any.
    pub fn latest_version(&self) -> Option<&ScreenVersion> {
        self.versions
            .iter()
            .filter(|v| v.is_usable())
            .max_by_key(|v| v.create_time)
    }

    /// Parse a screen listing; accepts `{"screens": [..]}` or a bare array.
    pub fn list_from_value(value: &Value) -> Result<Vec<Screen>, serde_json::Error> {
        let list = value.get("screens").unwrap_or(value);
        if list.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(list.clone())
    }
}

/// A design project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Full resource name, e.g. `projects/1`
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
}

impl Project {
    pub fn project_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Parse a project listing; accepts `{"projects": [..]}` or a bare array.
    pub fn list_from_value(value: &Value) -> Result<Vec<Project>, serde_json::Error> {
        let list = value.get("projects").unwrap_or(value);
        if list.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(list.clone())
    }
}
