//! Default filesystem-backed port implementations.

use crate::ports::{TemplateSource, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;

pub use ciselect_git::ShellGit;

/// Reads templates from disk.
#[derive(Debug, Clone, Default)]
pub struct FsTemplateSource;

impl TemplateSource for FsTemplateSource {
    fn load_template(&self, path: &Utf8Path) -> anyhow::Result<String> {
        fs::read_to_string(path).with_context(|| format!("read template {}", path))
    }
}

/// In-memory templates keyed by path, for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: BTreeMap<Utf8PathBuf, String>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(
        mut self,
        path: impl Into<Utf8PathBuf>,
        source: impl Into<String>,
    ) -> Self {
        self.templates.insert(path.into(), source.into());
        self
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load_template(&self, path: &Utf8Path) -> anyhow::Result<String> {
        self.templates
            .get(path)
            .cloned()
            .with_context(|| format!("template {} not found", path))
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
