//! Core generate and changes pipelines, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all filesystem and git operations
//! are performed through the port traits.

use crate::ports::{TemplateSource, WritePort};
use crate::settings::{ChangesSettings, GenerateSettings};
use anyhow::Context;
use ciselect_domain::{
    DetectError, Detection, GitPort, detect_changes, detect_changes_or_empty, select_build_set,
};
use ciselect_render::{RenderContext, RenderError, render_str};
use ciselect_types::change::ChangeSet;
use ciselect_types::selection::{BuildSet, SelectionReport, ToolInfo};
use tracing::{debug, info};

/// Error type for pipeline results.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

/// Outcome of `run_generate`.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub detection: Detection,
    pub build_set: BuildSet,
    pub rendered: String,
    pub report: SelectionReport,
}

/// Run the generate pipeline: detect changes, select projects, render the template.
///
/// Git failures never fail the pipeline; they select every project instead. Template
/// failures do. The caller writes the outcome (via `WritePort`) or uses
/// [`write_generate_artifacts`].
pub fn run_generate(
    settings: &GenerateSettings,
    git: &dyn GitPort,
    templates: &dyn TemplateSource,
    tool: ToolInfo,
) -> Result<GenerateOutcome, ToolError> {
    info!(
        base_revision = %settings.base_revision,
        head = settings.head.as_deref().unwrap_or("<unset>"),
        pull_request = settings.is_pull_request(),
        "selecting pipelines"
    );

    let detection =
        detect_changes_or_empty(git, settings.head.as_deref(), &settings.base_revision);
    let changed = detection.files().to_vec();
    debug!(?changed, "changed files");

    let build_set = select_build_set(&settings.projects, &changed);
    info!(
        selected = ?build_set.prefixes(),
        build_all = build_set.is_fallback(),
        "build set"
    );

    let mut ctx = RenderContext::new(&settings.projects, &build_set, &settings.base_revision)
        .with_changed_files(changed.clone())
        .with_pull_request(settings.is_pull_request());
    if let Some(cs) = detection.change_set() {
        ctx = ctx.with_range(cs.base.clone(), cs.head.clone());
    } else if let Some(head) = settings.head.as_deref() {
        ctx = ctx.with_range("", head);
    }

    let template_path = settings.resolve(&settings.template);
    let source = templates.load_template(&template_path)?;
    let template_name = settings.template.as_str();
    let rendered = render_str(template_name, &source, &ctx)?;

    let mut report = SelectionReport::new(tool, settings.base_revision.clone(), build_set.reason);
    report.head = settings.head.clone();
    if let Some(cs) = detection.change_set() {
        report.head = Some(cs.head.clone());
        report.base = Some(cs.base.clone());
        report.baseline = Some(cs.baseline);
    }
    report.detection_error = detection.error().map(|e| e.to_string());
    report.changed_files = changed;
    report.selected = build_set.prefixes();
    report.output = settings.output.to_string();

    Ok(GenerateOutcome {
        detection,
        build_set,
        rendered,
        report,
    })
}

/// Write the rendered document and, when configured, the selection report.
pub fn write_generate_artifacts(
    settings: &GenerateSettings,
    outcome: &GenerateOutcome,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    let output = settings.resolve(&settings.output);
    if let Some(parent) = output.parent().filter(|p| !p.as_str().is_empty()) {
        writer.create_dir_all(parent)?;
    }
    writer
        .write_file(&output, outcome.rendered.as_bytes())
        .with_context(|| format!("write generated config {}", output))?;
    info!("wrote {}", output);

    if let Some(report_path) = settings.report.as_deref() {
        let report_path = settings.resolve(report_path);
        if let Some(parent) = report_path.parent().filter(|p| !p.as_str().is_empty()) {
            writer.create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
        writer.write_file(&report_path, json.as_bytes())?;
        debug!("wrote selection report to {}", report_path);
    }
    Ok(())
}

/// Run change detection only. Unlike `run_generate`, git failures are errors.
pub fn run_changes(
    settings: &ChangesSettings,
    git: &dyn GitPort,
) -> Result<ChangeSet, ToolError> {
    let cs = detect_changes(git, settings.head.as_deref(), &settings.base_revision)?;
    debug!(
        repo_root = %settings.repo_root,
        files = cs.files.len(),
        range = %cs.range(),
        "changes"
    );
    Ok(cs)
}
