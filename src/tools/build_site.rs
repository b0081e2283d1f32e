//! build_site tool - Validated route table for a project, without writing files

use async_trait::async_trait;
use eyre::eyre;
use serde_json::{Value, json};

use super::{VirtualTool, required_str};
use crate::client::{RemoteClient, ToolArgs};
use crate::domain::Outcome;
use crate::site::SiteBuilder;

pub struct BuildSiteTool {
    builder: SiteBuilder,
}

impl BuildSiteTool {
    pub fn new(builder: SiteBuilder) -> Self {
        Self { builder }
    }
}

#[async_trait]
impl VirtualTool for BuildSiteTool {
    fn name(&self) -> &str {
        "build_site"
    }

    fn description(&self) -> &str {
        "Derive and validate the route table for a project's screens."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "projectId": {
                    "type": "string",
                    "description": "Project identifier"
                }
            },
            "required": ["projectId"]
        })
    }

    async fn execute(&self, client: &dyn RemoteClient, args: &ToolArgs) -> Result<Value, eyre::Error> {
        let project_id = required_str(args, "projectId")?;

        match self.builder.build(client, project_id).await {
            Outcome::Success(plan) => Ok(serde_json::to_value(plan.config)?),
            Outcome::Failure(err) => Err(eyre!("{}", err)),
        }
    }
}
