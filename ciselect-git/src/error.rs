//! Error types for ciselect-git.

use thiserror::Error;

/// A failed `git` invocation.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` executable could not be started.
    #[error("failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    /// git ran and exited unsuccessfully.
    #[error("git {args} exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: String,
        stderr: String,
    },

    #[error("git {args} produced non-UTF-8 output")]
    NonUtf8 { args: String },
}
