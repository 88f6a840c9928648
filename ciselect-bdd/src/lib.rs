//! Shared fixtures for the cucumber suite.
//!
//! [`TestRepo`] builds throwaway git repositories with a `main` branch and a CI
//! template. [`ciselect_command`] returns the binary under test with CI
//! environment variables cleared.

#![allow(deprecated)]

use assert_cmd::Command;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::process::Command as ProcessCommand;
use tempfile::TempDir;

/// Template whose job list is easy to scrape: one `- <job>` line per project.
pub const JOB_LIST_TEMPLATE: &str = "\
# range: {{base}}...{{head}}
jobs:
{{#each projects}}
  - {{job}}
{{/each}}
";

/// Make sure `target/<profile>/ciselect` exists.
///
/// `CARGO_BIN_EXE_ciselect` is only set for the cli package's own tests, so a
/// run of this crate alone would otherwise find no binary.
pub fn build_ciselect_binary() -> anyhow::Result<()> {
    let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut cmd = ProcessCommand::new(cargo);
    cmd.args(["build", "--quiet", "-p", "ciselect", "--bin", "ciselect"]);
    if !cfg!(debug_assertions) {
        cmd.arg("--release");
    }
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("cargo build -p ciselect failed: {status}");
    }
    Ok(())
}

/// The `ciselect` binary, run in `root` with CI environment variables cleared.
pub fn ciselect_command(root: &Utf8Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("ciselect")?;
    cmd.current_dir(root.as_str())
        .env_remove("CIRCLE_SHA1")
        .env_remove("BASE_REVISION")
        .env_remove("CIRCLE_PULL_REQUEST");
    Ok(cmd)
}

/// A temporary git repository on `main`; the CI template is written but not committed.
#[derive(Debug)]
pub struct TestRepo {
    _temp: TempDir,
    root: Utf8PathBuf,
}

impl TestRepo {
    pub fn init() -> anyhow::Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("non UTF-8 temp dir {}", p.display()))?;
        let repo = Self { _temp: temp, root };

        repo.git(&["init", "--quiet"])?;
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"])?;
        repo.git(&["config", "user.email", "bdd@example.com"])?;
        repo.git(&["config", "user.name", "BDD"])?;
        repo.git(&["config", "commit.gpgsign", "false"])?;
        repo.write(".circleci/ci-template.yml", JOB_LIST_TEMPLATE)?;
        repo.write(".gitignore", "generated_config.yml\n")?;
        Ok(repo)
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Run git in the repository and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = ProcessCommand::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;
        if !output.status.success() {
            anyhow::bail!(
                "git {:?} failed: {}",
                args,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(String::from_utf8(output.stdout)?.trim().to_string())
    }

    pub fn write(&self, rel: &str, contents: &str) -> anyhow::Result<()> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    /// Stage everything, commit, and return the new head sha.
    pub fn commit_all(&self, message: &str) -> anyhow::Result<String> {
        self.git(&["add", "-A"])?;
        self.git(&["commit", "--quiet", "-m", message])?;
        self.git(&["rev-parse", "HEAD"])
    }

    /// Job names from the `- <job>` lines of a rendered document.
    pub fn rendered_jobs(&self, rel: &str) -> anyhow::Result<Vec<String>> {
        let contents = fs::read_to_string(self.root.join(rel))?;
        Ok(parse_job_lines(&contents))
    }
}

fn parse_job_lines(doc: &str) -> Vec<String> {
    doc.lines()
        .filter_map(|l| l.trim().strip_prefix("- "))
        .map(str::to_string)
        .collect()
}
