//! Configuration file loading for ciselect.
//!
//! Discovers and loads `ciselect.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ciselect_core::settings::{
    ChangesSettings, DEFAULT_OUTPUT, DEFAULT_TEMPLATE, GenerateSettings,
};
use ciselect_types::DEFAULT_BASE_REVISION;
use ciselect_types::project::{Project, ProjectCatalog};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "ciselect.toml";

/// Top-level configuration from ciselect.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CiselectConfig {
    /// Git settings.
    pub git: GitConfig,

    /// Template and output paths.
    pub render: RenderConfig,

    /// Project catalog. When absent the built-in catalog applies.
    pub projects: Option<Vec<ProjectConfig>>,
}

/// Git section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Branch to compare against.
    pub base_revision: Option<String>,
}

/// Render section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub template: Option<Utf8PathBuf>,
    pub output: Option<Utf8PathBuf>,

    /// Where to write the selection report, if anywhere.
    pub report: Option<Utf8PathBuf>,
}

/// One `[[projects]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub prefix: String,
    pub filename: String,
    pub executor: String,
    pub working_dir: String,

    /// Job name. Defaults to `build-<prefix>` with `/` replaced by `-`.
    #[serde(default)]
    pub job: Option<String>,
}

impl From<ProjectConfig> for Project {
    fn from(p: ProjectConfig) -> Self {
        let project = Project::new(p.prefix, p.filename, p.executor, p.working_dir);
        match p.job {
            Some(job) => project.with_job(job),
            None => project,
        }
    }
}

impl CiselectConfig {
    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> anyhow::Result<ProjectCatalog> {
        match &self.projects {
            Some(projects) => {
                let projects = projects.iter().cloned().map(Project::from).collect();
                ProjectCatalog::new(projects).context("invalid [[projects]] in config")
            }
            None => Ok(ProjectCatalog::default()),
        }
    }
}

/// Discover the ciselect.toml config file.
///
/// Searches for `ciselect.toml` in the repository root directory.
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a ciselect.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<CiselectConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<CiselectConfig> {
    let config: CiselectConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from repo root, or return default if not found.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<CiselectConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(CiselectConfig::default()),
    }
}

/// CLI values for the generate command. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub head: Option<String>,
    pub base_revision: Option<String>,
    pub pull_request: Option<String>,
    pub template: Option<Utf8PathBuf>,
    pub output: Option<Utf8PathBuf>,
    pub report: Option<Utf8PathBuf>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: CiselectConfig,
}

impl ConfigMerger {
    /// Create a new merger from a loaded config.
    pub fn new(config: CiselectConfig) -> Self {
        Self { config }
    }

    fn base_revision(&self, cli: Option<String>) -> String {
        cli.filter(|r| !r.trim().is_empty())
            .or_else(|| self.config.git.base_revision.clone())
            .unwrap_or_else(|| DEFAULT_BASE_REVISION.to_string())
    }

    /// Merge with generate command CLI arguments.
    pub fn merge_generate_args(
        self,
        repo_root: Utf8PathBuf,
        cli: GenerateOverrides,
    ) -> anyhow::Result<GenerateSettings> {
        let projects = self.config.catalog()?;
        let base_revision = self.base_revision(cli.base_revision);
        let render = self.config.render;

        Ok(GenerateSettings {
            repo_root,
            head: cli.head,
            base_revision,
            pull_request: cli.pull_request,
            template: cli
                .template
                .or(render.template)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_TEMPLATE)),
            output: cli
                .output
                .or(render.output)
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
            report: cli.report.or(render.report),
            projects,
        })
    }

    /// Merge with changes command CLI arguments.
    pub fn merge_changes_args(
        self,
        repo_root: Utf8PathBuf,
        head: Option<String>,
        base_revision: Option<String>,
    ) -> ChangesSettings {
        let base_revision = self.base_revision(base_revision);
        ChangesSettings {
            repo_root,
            head,
            base_revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[git]
base_revision = "develop"

[render]
template = "ci/template.yml"
output = "out/config.yml"
report = "artifacts/ciselect/selection.json"

[[projects]]
prefix = "services/billing"
filename = "build/billing.yml"
executor = "python/default"
working_dir = "~/services/billing"

[[projects]]
prefix = "web"
filename = "build/web.yml"
executor = "node/default"
working_dir = "~/web"
job = "web-app"
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.git.base_revision.as_deref(), Some("develop"));
        assert_eq!(
            config.render.template.as_deref(),
            Some(Utf8Path::new("ci/template.yml"))
        );

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.projects()[0].job, "build-services-billing");
        assert_eq!(catalog.projects()[1].job, "web-app");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.git.base_revision.is_none());
        assert!(config.projects.is_none());
        assert_eq!(config.catalog().unwrap(), ProjectCatalog::default());
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(parse_config("[git\nbase_revision = ").is_err());
    }

    #[test]
    fn test_project_missing_field_is_rejected() {
        let contents = r#"
[[projects]]
prefix = "web"
filename = "build/web.yml"
"#;
        assert!(parse_config(contents).is_err());
    }

    #[test]
    fn test_duplicate_prefixes_are_rejected() {
        let contents = r#"
[[projects]]
prefix = "web"
filename = "a.yml"
executor = "node/default"
working_dir = "~/web"

[[projects]]
prefix = "web/"
filename = "b.yml"
executor = "node/default"
working_dir = "~/web"
"#;
        let config = parse_config(contents).unwrap();
        let err = config.catalog().unwrap_err();
        assert!(format!("{err:#}").contains("duplicate project prefix: web"));
    }

    #[test]
    fn test_merge_generate_cli_overrides_config() {
        let config = parse_config(
            r#"
[git]
base_revision = "develop"

[render]
output = "from-config.yml"
"#,
        )
        .unwrap();

        let settings = ConfigMerger::new(config)
            .merge_generate_args(
                Utf8PathBuf::from("."),
                GenerateOverrides {
                    base_revision: Some("release".to_string()),
                    output: Some(Utf8PathBuf::from("from-cli.yml")),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(settings.base_revision, "release");
        assert_eq!(settings.output, Utf8PathBuf::from("from-cli.yml"));
        assert_eq!(settings.template, Utf8PathBuf::from(DEFAULT_TEMPLATE));
    }

    #[test]
    fn test_merge_generate_falls_back_to_config_then_default() {
        let config = parse_config("[render]\nreport = \"r.json\"\n").unwrap();
        let settings = ConfigMerger::new(config)
            .merge_generate_args(Utf8PathBuf::from("."), GenerateOverrides::default())
            .unwrap();

        assert_eq!(settings.base_revision, DEFAULT_BASE_REVISION);
        assert_eq!(settings.output, Utf8PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(settings.report, Some(Utf8PathBuf::from("r.json")));
    }

    #[test]
    fn test_merge_changes_ignores_blank_cli_base() {
        let config = parse_config("[git]\nbase_revision = \"trunk\"\n").unwrap();
        let settings = ConfigMerger::new(config).merge_changes_args(
            Utf8PathBuf::from("."),
            Some("abc".to_string()),
            Some("".to_string()),
        );
        assert_eq!(settings.base_revision, "trunk");
        assert_eq!(settings.head.as_deref(), Some("abc"));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        let config = load_or_default(&root).unwrap();
        assert!(config.projects.is_none());
    }
}
