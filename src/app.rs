//! Command entry points.
//!
//! Every command runs inside a scoped session: the client is connected
//! before the command body and closed after it on every path. A failed
//! connect is reported as a `FETCH_FAILED` outcome. Input errors found
//! before any remote work are reported without connecting.

use std::sync::Arc;

use crate::client::{ClientError, RemoteClient, run_scoped};
use crate::domain::{ErrorCode, Outcome};
use crate::pipeline::{ExecutionContext, Pipeline, ToolCommandInput};
use crate::projects::list_projects;
use crate::site::{SiteBuilder, SiteInput};
use crate::tools::VirtualToolRegistry;
use crate::view::{ViewInput, missing_selector, view};

/// Command runner bound to one remote client
pub struct App {
    client: Arc<dyn RemoteClient>,
    site: SiteBuilder,
    virtual_tools: VirtualToolRegistry,
}

impl App {
    /// Create an app with the standard virtual tools
    pub fn new(client: Arc<dyn RemoteClient>, site: SiteBuilder) -> Self {
        let virtual_tools = VirtualToolRegistry::standard(site.clone());
        Self {
            client,
            site,
            virtual_tools,
        }
    }

    /// Replace the virtual tool registry
    pub fn with_virtual_tools(mut self, virtual_tools: VirtualToolRegistry) -> Self {
        self.virtual_tools = virtual_tools;
        self
    }

    pub fn virtual_tools(&self) -> &VirtualToolRegistry {
        &self.virtual_tools
    }

    /// List, describe or invoke a tool through the step pipeline.
    ///
    /// Errs only when the pipeline ends without a result.
    pub async fn tool(&self, input: ToolCommandInput) -> crate::Result<Outcome> {
        log::info!("Running tool command: {:?}", input.tool_name);
        let virtual_tools = self.virtual_tools.clone();
        let scoped = run_scoped(Arc::clone(&self.client), |client| async move {
            let ctx = ExecutionContext::new(input, client, virtual_tools);
            Pipeline::tool_invocation().execute(ctx).await
        })
        .await;

        match scoped {
            Ok(result) => Ok(result?),
            Err(e) => Ok(connect_failure(e)),
        }
    }

    /// Build or export a project's site
    pub async fn site(&self, input: &SiteInput) -> Outcome {
        log::info!("Running site command for project {}", input.project_id);
        let site = &self.site;
        run_scoped(Arc::clone(&self.client), |client| async move {
            site.run(client.as_ref(), input).await
        })
        .await
        .unwrap_or_else(connect_failure)
    }

    /// Fetch and decode a resource
    pub async fn view(&self, input: &ViewInput) -> Outcome {
        log::info!("Running view command");
        if input.selector().is_none() {
            return missing_selector();
        }
        run_scoped(Arc::clone(&self.client), |client| async move {
            view(client.as_ref(), input).await
        })
        .await
        .unwrap_or_else(connect_failure)
    }

    /// List the caller's projects
    pub async fn projects(&self) -> Outcome {
        log::info!("Running projects command");
        run_scoped(Arc::clone(&self.client), |client| async move {
            list_projects(client.as_ref()).await
        })
        .await
        .unwrap_or_else(connect_failure)
    }
}

fn connect_failure(e: ClientError) -> Outcome {
    Outcome::failure(ErrorCode::FetchFailed, format!("Failed to connect: {}", e))
}
