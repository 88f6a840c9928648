use ciselect_types::project::{ProjectCatalog, normalize_prefix};
use ciselect_types::selection::{BuildSet, SelectionReason};
use tracing::debug;

/// True when `path` is `prefix` itself or lies underneath it.
///
/// Matching is per path component: `frontend-legacy/x` is not under `frontend`.
pub fn path_matches_prefix(path: &str, prefix: &str) -> bool {
    let path = path.replace('\\', "/");
    let path = path.trim_start_matches("./");
    let prefix = normalize_prefix(prefix);
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix.as_str()) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Pick the projects touched by `changed`, or every project when none is touched.
pub fn select_build_set(catalog: &ProjectCatalog, changed: &[String]) -> BuildSet {
    let selected: Vec<_> = catalog
        .projects()
        .iter()
        .filter(|p| changed.iter().any(|f| path_matches_prefix(f, &p.prefix)))
        .cloned()
        .collect();

    if selected.is_empty() {
        debug!(
            changed = changed.len(),
            "no project matched the change set; building all projects"
        );
        return BuildSet {
            projects: catalog.projects().to_vec(),
            reason: SelectionReason::Fallback,
        };
    }

    debug!(
        selected = ?selected.iter().map(|p| p.prefix.as_str()).collect::<Vec<_>>(),
        "selected projects"
    );
    BuildSet {
        projects: selected,
        reason: SelectionReason::Matched,
    }
}
