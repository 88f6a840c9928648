use crate::ports::GitPort;
use anyhow::Context;
use ciselect_types::EMPTY_TREE_SHA;
use ciselect_types::change::{Baseline, ChangeSet};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("head commit is not set")]
    MissingHead,

    #[error("git: {0:#}")]
    Git(#[from] anyhow::Error),
}

/// Outcome of best-effort change detection.
#[derive(Debug)]
pub enum Detection {
    Detected(ChangeSet),
    Failed(DetectError),
}

impl Detection {
    /// Changed paths; empty when detection failed.
    pub fn files(&self) -> &[String] {
        match self {
            Detection::Detected(cs) => &cs.files,
            Detection::Failed(_) => &[],
        }
    }

    pub fn change_set(&self) -> Option<&ChangeSet> {
        match self {
            Detection::Detected(cs) => Some(cs),
            Detection::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DetectError> {
        match self {
            Detection::Detected(_) => None,
            Detection::Failed(e) => Some(e),
        }
    }
}

/// Compute the files changed on `head` relative to its merge base with `base_revision`.
///
/// Both revisions are checked out first so they exist locally. When the merge base is head
/// itself (building on the base branch), head's first parent becomes the base; if head has no
/// parent the empty tree is used, so a root commit reports every file it adds.
pub fn detect_changes(
    git: &dyn GitPort,
    head: Option<&str>,
    base_revision: &str,
) -> Result<ChangeSet, DetectError> {
    let head = head
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(DetectError::MissingHead)?;

    git.checkout(base_revision)
        .with_context(|| format!("checkout {base_revision}"))?;
    git.checkout(head).with_context(|| format!("checkout {head}"))?;

    let head_sha = git
        .rev_parse(head)
        .with_context(|| format!("rev-parse {head}"))?;
    let merge_base = git
        .merge_base(base_revision, &head_sha)
        .with_context(|| format!("merge-base {base_revision} {head_sha}"))?;
    debug!(%merge_base, head = %head_sha, "computed merge base");

    let (base, baseline) = if merge_base == head_sha {
        match git.rev_parse("HEAD~1") {
            Ok(parent) => (parent, Baseline::FirstParent),
            Err(e) => {
                debug!(error = %e, "HEAD~1 does not resolve, using the empty tree");
                (EMPTY_TREE_SHA.to_string(), Baseline::EmptyTree)
            }
        }
    } else {
        (merge_base, Baseline::MergeBase)
    };

    info!("Comparing {}...{}", base, head_sha);
    let files = git
        .diff_names(&base, &head_sha)
        .with_context(|| format!("diff {base} {head_sha}"))?;

    Ok(ChangeSet {
        base,
        head: head_sha,
        baseline,
        files,
    })
}

/// Like [`detect_changes`], but a failure is logged and reported as "no changes".
pub fn detect_changes_or_empty(
    git: &dyn GitPort,
    head: Option<&str>,
    base_revision: &str,
) -> Detection {
    match detect_changes(git, head, base_revision) {
        Ok(cs) => {
            debug!(files = cs.files.len(), baseline = cs.baseline.as_str(), "changes detected");
            Detection::Detected(cs)
        }
        Err(e) => {
            warn!(error = %e, "No changes found");
            Detection::Failed(e)
        }
    }
}
