//! `GitPort` backed by the `git` command-line tool.
//!
//! Every call is a blocking subprocess run in the repository root. Output is captured; stderr
//! ends up in the error on failure and in debug logs otherwise.

mod error;

pub use error::GitError;

use camino::Utf8PathBuf;
use ciselect_domain::GitPort;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ShellGit {
    repo_root: Utf8PathBuf,
}

impl ShellGit {
    pub fn new(repo_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Run `git <args>` and return its stdout untouched.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let joined = args.join(" ");
        debug!(repo_root = %self.repo_root, args = %joined, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .map_err(|source| GitError::Spawn {
                args: joined.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                args: joined,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            debug!(args = %joined, stderr = %stderr.trim(), "git stderr");
        }

        String::from_utf8(output.stdout).map_err(|_| GitError::NonUtf8 { args: joined })
    }
}

impl GitPort for ShellGit {
    fn checkout(&self, revision: &str) -> anyhow::Result<()> {
        self.run(&["checkout", revision])?;
        Ok(())
    }

    fn merge_base(&self, a: &str, b: &str) -> anyhow::Result<String> {
        Ok(self.run(&["merge-base", a, b])?.trim().to_string())
    }

    fn rev_parse(&self, revision: &str) -> anyhow::Result<String> {
        // Without --verify an unresolvable argument is echoed back with exit 0.
        let spec = format!("{revision}^{{commit}}");
        Ok(self
            .run(&["rev-parse", "--verify", "--quiet", &spec])?
            .trim()
            .to_string())
    }

    fn diff_names(&self, base: &str, head: &str) -> anyhow::Result<Vec<String>> {
        let out = self.run(&[
            "-c",
            "core.quotePath=false",
            "diff",
            "--name-only",
            base,
            head,
        ])?;
        // Paths may carry meaningful whitespace; only line terminators go.
        Ok(out
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}
