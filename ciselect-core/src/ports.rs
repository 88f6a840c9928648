//! Port traits abstracting file I/O away from the pipeline.

use camino::Utf8Path;

/// Source of the CI template text.
pub trait TemplateSource {
    fn load_template(&self, path: &Utf8Path) -> anyhow::Result<String>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
