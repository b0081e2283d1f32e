//! Project listing.

use serde_json::json;

use crate::client::{RemoteClient, ToolArgs};
use crate::domain::{ErrorCode, Outcome, Project};

/// List the caller's projects. An empty listing is a domain failure.
pub async fn list_projects(client: &dyn RemoteClient) -> Outcome {
    let raw = match client.invoke("list_projects", &ToolArgs::new()).await {
        Ok(raw) => raw,
        Err(e) => return Outcome::failure(ErrorCode::FetchFailed, format!("Failed to list projects: {}", e)),
    };

    match Project::list_from_value(&raw) {
        Ok(projects) if projects.is_empty() => Outcome::failure(ErrorCode::NoProjectsFound, "No projects found"),
        Ok(projects) => {
            log::info!("Found {} projects", projects.len());
            let entries: Vec<_> = projects
                .iter()
                .map(|p| json!({ "projectId": p.project_id(), "name": p.name, "title": p.title }))
                .collect();
            Outcome::success(json!({ "projects": entries }))
        }
        Err(e) => Outcome::failure(ErrorCode::FetchFailed, format!("Unexpected project listing: {}", e)),
    }
}
