use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A sub-project whose pipeline is emitted when files under `prefix` change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Repo-relative path prefix, e.g. `backend/api`.
    pub prefix: String,

    /// Pipeline config file for this project, e.g. `build/api.yml`.
    pub filename: String,

    /// CI executor, e.g. `python/default`.
    pub executor: String,

    pub working_dir: String,

    pub job: String,
}

impl Project {
    /// Build a project with the job name derived from its prefix.
    pub fn new(
        prefix: impl Into<String>,
        filename: impl Into<String>,
        executor: impl Into<String>,
        working_dir: impl Into<String>,
    ) -> Self {
        let prefix = normalize_prefix(&prefix.into());
        let job = default_job_name(&prefix);
        Self {
            prefix,
            filename: filename.into(),
            executor: executor.into(),
            working_dir: working_dir.into(),
            job,
        }
    }

    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = job.into();
        self
    }
}

/// `backend/api` -> `build-backend-api`.
pub fn default_job_name(prefix: &str) -> String {
    let slug: Vec<&str> = prefix.split('/').filter(|s| !s.is_empty()).collect();
    format!("build-{}", slug.join("-"))
}

/// Strip surrounding whitespace, a leading `./` and trailing separators; backslashes become `/`.
pub fn normalize_prefix(prefix: &str) -> String {
    let prefix = prefix.trim().replace('\\', "/");
    prefix
        .trim_start_matches("./")
        .trim_end_matches('/')
        .to_string()
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate project prefix: {prefix}")]
    DuplicatePrefix { prefix: String },

    #[error("project prefix must not be empty (job {job:?})")]
    EmptyPrefix { job: String },
}

/// Ordered set of projects keyed by unique path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Validate and wrap `projects`, keeping their order.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(projects.len());
        for mut p in projects {
            p.prefix = normalize_prefix(&p.prefix);
            if p.prefix.is_empty() {
                return Err(CatalogError::EmptyPrefix { job: p.job });
            }
            if !seen.insert(p.prefix.clone()) {
                return Err(CatalogError::DuplicatePrefix { prefix: p.prefix });
            }
            out.push(p);
        }
        Ok(Self { projects: out })
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, prefix: &str) -> Option<&Project> {
        let prefix = normalize_prefix(prefix);
        self.projects.iter().find(|p| p.prefix == prefix)
    }
}

impl Default for ProjectCatalog {
    /// Backend API, backend consumer and frontend.
    fn default() -> Self {
        Self {
            projects: vec![
                Project::new(
                    "backend/api",
                    "build/api.yml",
                    "python/default",
                    "~/backend/api",
                ),
                Project::new(
                    "backend/consumer",
                    "build/consumer.yml",
                    "python/default",
                    "~/backend/consumer",
                ),
                Project::new("frontend", "build/frontend.yml", "node/default", "~/frontend"),
            ],
        }
    }
}

impl<'a> IntoIterator for &'a ProjectCatalog {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}
