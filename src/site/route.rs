//! Route table types and validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a screen is published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Included,
    Ignored,
}

/// One screen's inclusion decision and target path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub screen_id: String,
    pub route: String,
    pub status: RouteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RouteEntry {
    pub fn included(screen_id: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
            route: route.into(),
            status: RouteStatus::Included,
            warning: None,
        }
    }

    pub fn ignored(screen_id: impl Into<String>, route: impl Into<String>, warning: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
            route: route.into(),
            status: RouteStatus::Ignored,
            warning: Some(warning.into()),
        }
    }

    pub fn is_included(&self) -> bool {
        self.status == RouteStatus::Included
    }
}

/// Route table for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    pub project_id: String,
    pub routes: Vec<RouteEntry>,
}

/// Validation failure for a route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRoutes {
    /// Each duplicated route with the screens claiming it
    pub conflicts: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for DuplicateRoutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes: Vec<&str> = self.conflicts.keys().map(String::as_str).collect();
        write!(f, "Duplicate routes found: {}", routes.join(", "))
    }
}

impl std::error::Error for DuplicateRoutes {}

impl RouteConfig {
    pub fn new(project_id: impl Into<String>, routes: Vec<RouteEntry>) -> Self {
        Self {
            project_id: project_id.into(),
            routes,
        }
    }

    /// Check that included routes are pairwise unique.
    pub fn validate(&self) -> Result<(), DuplicateRoutes> {
        let mut claims: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in self.routes.iter().filter(|e| e.is_included()) {
            claims
                .entry(entry.route.clone())
                .or_default()
                .push(entry.screen_id.clone());
        }

        let conflicts: BTreeMap<String, Vec<String>> =
            claims.into_iter().filter(|(_, screens)| screens.len() > 1).collect();

        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(DuplicateRoutes { conflicts })
        }
    }

    pub fn included(&self) -> impl Iterator<Item = &RouteEntry> {
        self.routes.iter().filter(|e| e.is_included())
    }

    /// Self-contained export document
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Re-parse an exported document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
