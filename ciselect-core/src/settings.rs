//! Clap-free settings for the generate and changes pipelines.

use camino::{Utf8Path, Utf8PathBuf};
use ciselect_types::DEFAULT_BASE_REVISION;
use ciselect_types::project::ProjectCatalog;

pub const DEFAULT_TEMPLATE: &str = ".circleci/ci-template.yml";
pub const DEFAULT_OUTPUT: &str = "generated_config.yml";

/// Settings for the generate pipeline.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub repo_root: Utf8PathBuf,

    // Revisions
    pub head: Option<String>,
    pub base_revision: String,
    pub pull_request: Option<String>,

    // Files, relative to repo_root unless absolute
    pub template: Utf8PathBuf,
    pub output: Utf8PathBuf,
    pub report: Option<Utf8PathBuf>,

    pub projects: ProjectCatalog,
}

impl GenerateSettings {
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        resolve(&self.repo_root, path)
    }

    /// True when building on behalf of a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request
            .as_deref()
            .is_some_and(|pr| !pr.trim().is_empty())
    }
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            head: None,
            base_revision: DEFAULT_BASE_REVISION.to_string(),
            pull_request: None,
            template: Utf8PathBuf::from(DEFAULT_TEMPLATE),
            output: Utf8PathBuf::from(DEFAULT_OUTPUT),
            report: None,
            projects: ProjectCatalog::default(),
        }
    }
}

/// Settings for the changes pipeline.
#[derive(Debug, Clone)]
pub struct ChangesSettings {
    pub repo_root: Utf8PathBuf,
    pub head: Option<String>,
    pub base_revision: String,
}

impl Default for ChangesSettings {
    fn default() -> Self {
        Self {
            repo_root: Utf8PathBuf::from("."),
            head: None,
            base_revision: DEFAULT_BASE_REVISION.to_string(),
        }
    }
}

fn resolve(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_relative_paths_only() {
        let settings = GenerateSettings {
            repo_root: Utf8PathBuf::from("/repo"),
            ..Default::default()
        };
        assert_eq!(
            settings.resolve(Utf8Path::new("generated_config.yml")),
            Utf8PathBuf::from("/repo/generated_config.yml")
        );
        assert_eq!(
            settings.resolve(Utf8Path::new("/tmp/out.yml")),
            Utf8PathBuf::from("/tmp/out.yml")
        );
    }

    #[test]
    fn blank_pull_request_is_not_a_pull_request() {
        let mut settings = GenerateSettings::default();
        assert!(!settings.is_pull_request());
        settings.pull_request = Some("  ".to_string());
        assert!(!settings.is_pull_request());
        settings.pull_request = Some("https://github.com/o/r/pull/7".to_string());
        assert!(settings.is_pull_request());
    }
}
