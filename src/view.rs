//! Ad-hoc resource viewing.
//!
//! Exactly one selector is honoured, in fixed priority order: list-all, by
//! resource name, by source screen, by project and screen, by project.

use serde_json::{Value, json};

use crate::client::{RemoteClient, ToolArgs};
use crate::domain::{ErrorCode, Outcome};

/// Validated input of the view command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewInput {
    pub list: bool,
    pub name: Option<String>,
    pub source_screen: Option<String>,
    pub project_id: Option<String>,
    pub screen_id: Option<String>,
}

/// The branch a view takes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSelector {
    ListAll,
    ByName(String),
    BySourceScreen(String),
    ByProjectScreen { project_id: String, screen_id: String },
    ByProject(String),
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ViewInput {
    /// Highest-priority selector present, if any
    pub fn selector(&self) -> Option<ViewSelector> {
        if self.list {
            return Some(ViewSelector::ListAll);
        }
        if let Some(name) = present(&self.name) {
            return Some(ViewSelector::ByName(name.to_string()));
        }
        if let Some(source) = present(&self.source_screen) {
            return Some(ViewSelector::BySourceScreen(source.to_string()));
        }
        match (present(&self.project_id), present(&self.screen_id)) {
            (Some(project_id), Some(screen_id)) => Some(ViewSelector::ByProjectScreen {
                project_id: project_id.to_string(),
                screen_id: screen_id.to_string(),
            }),
            (Some(project_id), None) => Some(ViewSelector::ByProject(project_id.to_string())),
            _ => None,
        }
    }
}

/// Resolve the selector, fetch, and decode nested JSON text.
pub async fn view(client: &dyn RemoteClient, input: &ViewInput) -> Outcome {
    let Some(selector) = input.selector() else {
        return missing_selector();
    };
    log::debug!("Viewing {:?}", selector);

    match fetch(client, &selector).await {
        Ok(value) => Outcome::success(decode_nested(value)),
        Err(e) => Outcome::failure(ErrorCode::FetchFailed, format!("Failed to fetch {}: {}", describe(&selector), e)),
    }
}

/// Failure reported when no selector is present
pub fn missing_selector() -> Outcome {
    Outcome::failure(
        ErrorCode::InvalidArgs,
        "Specify one of --list, --name, --source-screen or --project-id",
    )
}

async fn fetch(client: &dyn RemoteClient, selector: &ViewSelector) -> Result<Value, crate::client::ClientError> {
    match selector {
        ViewSelector::ListAll => client.list_resources().await,
        ViewSelector::ByName(name) => client.read_resource(name).await,
        ViewSelector::BySourceScreen(source) => client.read_resource(source).await,
        ViewSelector::ByProjectScreen { project_id, screen_id } => {
            let mut args = ToolArgs::new();
            args.insert("projectId".into(), json!(project_id));
            args.insert("screenId".into(), json!(screen_id));
            client.invoke("get_screen", &args).await
        }
        ViewSelector::ByProject(project_id) => {
            let mut args = ToolArgs::new();
            args.insert("name".into(), json!(format!("projects/{}", project_id)));
            client.invoke("get_project", &args).await
        }
    }
}

fn describe(selector: &ViewSelector) -> String {
    match selector {
        ViewSelector::ListAll => "resource list".to_string(),
        ViewSelector::ByName(name) => format!("resource {}", name),
        ViewSelector::BySourceScreen(source) => format!("source screen {}", source),
        ViewSelector::ByProjectScreen { project_id, screen_id } => {
            format!("screen {} in project {}", screen_id, project_id)
        }
        ViewSelector::ByProject(project_id) => format!("project {}", project_id),
    }
}

/// Replace strings holding JSON objects or arrays with their parsed value.
///
/// Strings that fail to parse are kept unchanged.
pub fn decode_nested(value: Value) -> Value {
    match value {
        Value::String(text) => {
            let trimmed = text.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                match serde_json::from_str::<Value>(&text) {
                    Ok(parsed) => decode_nested(parsed),
                    Err(_) => Value::String(text),
                }
            } else {
                Value::String(text)
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(decode_nested).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, decode_nested(v))).collect()),
        other => other,
    }
}
