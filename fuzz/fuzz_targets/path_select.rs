#![no_main]

//! Fuzz target for prefix matching and build-set selection.
//!
//! Selection must never come back empty, and a matched project must have
//! at least one changed path under its prefix.

use arbitrary::Arbitrary;
use ciselect_domain::{path_matches_prefix, select_build_set};
use ciselect_types::project::{Project, ProjectCatalog};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    prefixes: Vec<String>,
    changed: Vec<String>,
}

fuzz_target!(|input: Input| {
    for path in &input.changed {
        for prefix in &input.prefixes {
            let _ = path_matches_prefix(path, prefix);
        }
    }

    let projects = input
        .prefixes
        .iter()
        .map(|p| Project::new(p.clone(), "build.yml", "python/default", "~/"))
        .collect();
    let Ok(catalog) = ProjectCatalog::new(projects) else {
        return;
    };

    let build_set = select_build_set(&catalog, &input.changed);
    assert_eq!(build_set.projects.is_empty(), catalog.is_empty());
    if !build_set.is_fallback() {
        for project in &build_set.projects {
            assert!(
                input
                    .changed
                    .iter()
                    .any(|f| path_matches_prefix(f, &project.prefix))
            );
        }
    }
});
