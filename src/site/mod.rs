//! Site building - route tables assembled from project screens
//!
//! Each screen becomes one route entry. Obsolete or unrendered screens are
//! kept in the table as ignored entries with a warning. Included routes must
//! be unique or the whole build is rejected.

mod builder;
mod route;

pub use builder::{DEFAULT_CONFIG_FILE, SiteBuilder, SitePlan, fetch_screens, page_path, slugify};
pub use route::{DuplicateRoutes, RouteConfig, RouteEntry, RouteStatus};

use std::path::PathBuf;

/// Validated input of the site command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteInput {
    pub project_id: String,
    pub output_dir: PathBuf,
    /// Emit only the route table
    pub export: bool,
}

impl SiteInput {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            output_dir: PathBuf::from("."),
            export: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = export;
        self
    }
}
