//! Site builder.
//!
//! Turns a project's screens into a validated route table, then either
//! exports the table alone or writes one HTML page per included route.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use super::SiteInput;
use super::route::{RouteConfig, RouteEntry};
use crate::client::{RemoteClient, ToolArgs, resource_text};
use crate::domain::{ErrorCode, Outcome, Screen, ScreenState};

/// Default export file name
pub const DEFAULT_CONFIG_FILE: &str = "site-config.json";

const OBSOLETE_WARNING: &str = "screen is obsolete";
const UNRENDERED_WARNING: &str = "screen has no rendered version";

/// A validated route table plus where each included page's HTML lives
#[derive(Debug, Clone)]
pub struct SitePlan {
    pub config: RouteConfig,
    sources: HashMap<String, String>,
}

impl SitePlan {
    /// Resource URI of the HTML for `screen_id`
    pub fn source(&self, screen_id: &str) -> Option<&str> {
        self.sources.get(screen_id).map(String::as_str)
    }
}

/// Builds route tables and site output from project screens
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    index_titles: Vec<String>,
    config_file: String,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self {
            index_titles: vec!["home".to_string(), "index".to_string(), "landing".to_string()],
            config_file: DEFAULT_CONFIG_FILE.to_string(),
        }
    }
}

impl SiteBuilder {
    pub fn new(index_titles: Vec<String>, config_file: impl Into<String>) -> Self {
        Self {
            index_titles: index_titles.iter().map(|t| slugify(t)).collect(),
            config_file: config_file.into(),
        }
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }

    /// URL path for a screen
    pub fn derive_route(&self, screen: &Screen) -> String {
        let slug = slugify(&screen.title);
        if self.index_titles.iter().any(|t| *t == slug) {
            return "/".to_string();
        }
        if slug.is_empty() {
            return format!("/screen-{}", slugify(&screen.screen_id()));
        }
        format!("/{}", slug)
    }

    /// Inclusion decision for a screen
    pub fn entry_for(&self, screen: &Screen) -> RouteEntry {
        let route = self.derive_route(screen);
        let screen_id = screen.screen_id();

        if screen.state == ScreenState::Obsolete {
            return RouteEntry::ignored(screen_id, route, OBSOLETE_WARNING);
        }
        if screen.latest_version().is_none() {
            return RouteEntry::ignored(screen_id, route, UNRENDERED_WARNING);
        }
        RouteEntry::included(screen_id, route)
    }

    /// Derive every entry for a project; no validation yet
    pub fn plan(&self, project_id: &str, screens: &[Screen]) -> SitePlan {
        let mut sources = HashMap::new();
        let routes = screens
            .iter()
            .map(|screen| {
                let entry = self.entry_for(screen);
                if entry.is_included() {
                    if let Some(uri) = screen.latest_version().and_then(|v| v.download_url.clone()) {
                        sources.insert(entry.screen_id.clone(), uri);
                    }
                }
                entry
            })
            .collect();

        SitePlan {
            config: RouteConfig::new(project_id, routes),
            sources,
        }
    }

    /// Fetch, derive and validate. Duplicate routes reject the whole build.
    pub async fn build(&self, client: &dyn RemoteClient, project_id: &str) -> Outcome<SitePlan> {
        let screens = match fetch_screens(client, project_id).await {
            Outcome::Success(screens) => screens,
            Outcome::Failure(err) => return Outcome::Failure(err),
        };

        let plan = self.plan(project_id, &screens);
        for entry in plan.config.routes.iter().filter(|e| !e.is_included()) {
            log::info!(
                "Ignoring screen {}: {}",
                entry.screen_id,
                entry.warning.as_deref().unwrap_or_default()
            );
        }

        if let Err(e) = plan.config.validate() {
            log::warn!("Rejecting site for project {}: {}", project_id, e);
            return Outcome::failure(ErrorCode::DuplicateRoutes, e.to_string());
        }
        Outcome::success(plan)
    }

    /// Build, then export the route table or write the pages.
    pub async fn run(&self, client: &dyn RemoteClient, input: &SiteInput) -> Outcome<Value> {
        let plan = match self.build(client, &input.project_id).await {
            Outcome::Success(plan) => plan,
            Outcome::Failure(err) => return Outcome::Failure(err),
        };

        if let Err(e) = tokio::fs::create_dir_all(&input.output_dir).await {
            return Outcome::failure(
                ErrorCode::WriteFailed,
                format!("Failed to create {}: {}", input.output_dir.display(), e),
            );
        }

        if input.export {
            return match self.write_config(&plan.config, &input.output_dir).await {
                Ok(_) => Outcome::success(plan.config).into_value(),
                Err(outcome) => outcome,
            };
        }

        // Every page is read before any file is written.
        let mut rendered = Vec::new();
        for entry in plan.config.included() {
            match self.fetch_page(client, &plan, entry).await {
                Ok(html) => rendered.push((page_path(&input.output_dir, &entry.route), html)),
                Err(outcome) => return outcome,
            }
        }

        let mut pages = Vec::new();
        for (path, html) in &rendered {
            if let Err(outcome) = write_page(path, html).await {
                return outcome;
            }
            pages.push(path.display().to_string());
        }
        let config_path = match self.write_config(&plan.config, &input.output_dir).await {
            Ok(path) => path,
            Err(outcome) => return outcome,
        };

        log::info!("Wrote {} pages to {}", pages.len(), input.output_dir.display());
        Outcome::success(json!({
            "projectId": plan.config.project_id,
            "outputDir": input.output_dir.display().to_string(),
            "configFile": config_path.display().to_string(),
            "pages": pages,
            "routes": plan.config.routes,
        }))
    }

    async fn write_config(&self, config: &RouteConfig, dir: &Path) -> Result<PathBuf, Outcome<Value>> {
        let path = dir.join(&self.config_file);
        let document = config
            .to_json()
            .map_err(|e| Outcome::failure(ErrorCode::WriteFailed, format!("Failed to serialize routes: {}", e)))?;
        tokio::fs::write(&path, document).await.map_err(|e| {
            Outcome::failure(ErrorCode::WriteFailed, format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }

    async fn fetch_page(
        &self,
        client: &dyn RemoteClient,
        plan: &SitePlan,
        entry: &RouteEntry,
    ) -> Result<String, Outcome<Value>> {
        let uri = plan.source(&entry.screen_id).ok_or_else(|| {
            Outcome::failure(ErrorCode::FetchFailed, format!("No source for screen {}", entry.screen_id))
        })?;
        let resource = client.read_resource(uri).await.map_err(|e| {
            Outcome::failure(ErrorCode::FetchFailed, format!("Failed to read {}: {}", uri, e))
        })?;
        resource_text(&resource).ok_or_else(|| {
            Outcome::failure(ErrorCode::FetchFailed, format!("Resource {} has no text content", uri))
        })
    }
}

async fn write_page(path: &Path, html: &str) -> Result<(), Outcome<Value>> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            Outcome::failure(ErrorCode::WriteFailed, format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    tokio::fs::write(path, html).await.map_err(|e| {
        Outcome::failure(ErrorCode::WriteFailed, format!("Failed to write {}: {}", path.display(), e))
    })
}

/// Fetch and parse a project's screens
pub async fn fetch_screens(client: &dyn RemoteClient, project_id: &str) -> Outcome<Vec<Screen>> {
    let mut args = ToolArgs::new();
    args.insert("projectId".into(), json!(project_id));

    let raw = match client.invoke("list_screens", &args).await {
        Ok(raw) => raw,
        Err(e) => {
            return Outcome::failure(
                ErrorCode::FetchFailed,
                format!("Failed to fetch screens for project {}: {}", project_id, e),
            );
        }
    };

    match Screen::list_from_value(&raw) {
        Ok(screens) if screens.is_empty() => {
            Outcome::failure(ErrorCode::NoScreensFound, format!("No screens found in project {}", project_id))
        }
        Ok(screens) => Outcome::success(screens),
        Err(e) => Outcome::failure(ErrorCode::FetchFailed, format!("Unexpected screen listing: {}", e)),
    }
}

/// Lowercase, alphanumeric runs joined by single dashes
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// File a route is written to: `/` maps to `index.html`, `/a` to `a/index.html`
pub fn page_path(dir: &Path, route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        dir.join("index.html")
    } else {
        dir.join(trimmed).join("index.html")
    }
}
