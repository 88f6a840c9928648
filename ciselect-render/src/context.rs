use ciselect_types::project::{Project, ProjectCatalog};
use ciselect_types::selection::BuildSet;
use serde::Serialize;

/// Variables visible to the CI template.
///
/// Every field is always present so strict-mode templates can reference any of them; unknown
/// values are empty strings rather than `null`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Projects to build.
    pub projects: Vec<Project>,

    pub all_projects: Vec<Project>,

    /// True when the whole catalog was selected as a fallback.
    pub build_all: bool,

    pub head: String,
    pub base: String,
    pub base_revision: String,
    pub pull_request: bool,
    pub changed_files: Vec<String>,
}

impl RenderContext {
    pub fn new(catalog: &ProjectCatalog, build_set: &BuildSet, base_revision: &str) -> Self {
        Self {
            projects: build_set.projects.clone(),
            all_projects: catalog.projects().to_vec(),
            build_all: build_set.is_fallback(),
            head: String::new(),
            base: String::new(),
            base_revision: base_revision.to_string(),
            pull_request: false,
            changed_files: Vec::new(),
        }
    }

    pub fn with_range(mut self, base: impl Into<String>, head: impl Into<String>) -> Self {
        self.base = base.into();
        self.head = head.into();
        self
    }

    pub fn with_changed_files(mut self, files: Vec<String>) -> Self {
        self.changed_files = files;
        self
    }

    pub fn with_pull_request(mut self, pull_request: bool) -> Self {
        self.pull_request = pull_request;
        self
    }
}
