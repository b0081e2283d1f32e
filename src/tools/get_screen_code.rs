//! get_screen_code tool - Fetch a screen and the HTML of its newest rendering

use async_trait::async_trait;
use eyre::eyre;
use serde_json::{Value, json};

use super::{VirtualTool, required_str};
use crate::client::{RemoteClient, ToolArgs, resource_text};
use crate::domain::Screen;

pub struct GetScreenCodeTool;

#[async_trait]
impl VirtualTool for GetScreenCodeTool {
    fn name(&self) -> &str {
        "get_screen_code"
    }

    fn description(&self) -> &str {
        "Fetch a screen and return the HTML of its newest rendered version."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Project identifier"
                },
                "screenId": {
                    "type": "string",
                    "description": "Screen identifier"
                }
            },
            "required": ["projectId", "screenId"]
        })
    }

    async fn execute(&self, client: &dyn RemoteClient, args: &ToolArgs) -> Result<Value, eyre::Error> {
        let project_id = required_str(args, "projectId")?;
        let screen_id = required_str(args, "screenId")?;

        let mut lookup = ToolArgs::new();
        lookup.insert("projectId".into(), json!(project_id));
        lookup.insert("screenId".into(), json!(screen_id));

        let raw = client.invoke("get_screen", &lookup).await?;
        let screen: Screen = serde_json::from_value(raw.get("screen").cloned().unwrap_or(raw))?;

        let version = screen
            .latest_version()
            .ok_or_else(|| eyre!("Screen '{}' has no rendered version", screen_id))?;
        let uri = version.download_url.as_deref().unwrap_or_default();

        let resource = client.read_resource(uri).await?;
        let html = resource_text(&resource).ok_or_else(|| eyre!("Resource '{}' has no text content", uri))?;

        Ok(json!({
            "screenId": screen.screen_id(),
            "title": screen.title,
            "html": html,
        }))
    }
}
