use crate::change::Baseline;
use crate::project::Project;
use serde::{Deserialize, Serialize};

/// Why a build set contains what it contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionReason {
    /// At least one project matched a changed path.
    Matched,
    /// Nothing matched (or detection failed); every project is built.
    Fallback,
}

/// Projects whose pipelines must run, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSet {
    pub projects: Vec<Project>,
    pub reason: SelectionReason,
}

impl BuildSet {
    pub fn is_fallback(&self) -> bool {
        self.reason == SelectionReason::Fallback
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.prefix.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// On-disk summary of one `generate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub generated_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    pub base_revision: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Baseline>,

    /// Set when change detection failed and the full catalog was selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_error: Option<String>,

    #[serde(default)]
    pub changed_files: Vec<String>,

    #[serde(default)]
    pub selected: Vec<String>,

    pub reason: SelectionReason,

    pub output: String,
}

impl SelectionReport {
    pub fn new(tool: ToolInfo, base_revision: String, reason: SelectionReason) -> Self {
        Self {
            schema: crate::schema::CISELECT_SELECTION_V1.to_string(),
            tool,
            generated_at: chrono::Utc::now().to_rfc3339(),
            head: None,
            base: None,
            base_revision,
            baseline: None,
            detection_error: None,
            changed_files: Vec::new(),
            selected: Vec::new(),
            reason,
            output: String::new(),
        }
    }
}
