use serde::{Deserialize, Serialize};

/// How the diff base for a change set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Baseline {
    /// Merge base of the base revision and head.
    MergeBase,
    /// Head sits on the base revision; its first parent is used instead.
    FirstParent,
    /// Head has no parent; compared against the empty tree.
    EmptyTree,
}

impl Baseline {
    pub fn as_str(self) -> &'static str {
        match self {
            Baseline::MergeBase => "merge_base",
            Baseline::FirstParent => "first_parent",
            Baseline::EmptyTree => "empty_tree",
        }
    }
}

/// Files differing between `base` and `head`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    pub base: String,
    pub head: String,
    pub baseline: Baseline,

    #[serde(default)]
    pub files: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// `<base>...<head>`, the range as printed in logs.
    pub fn range(&self) -> String {
        format!("{}...{}", self.base, self.head)
    }
}
