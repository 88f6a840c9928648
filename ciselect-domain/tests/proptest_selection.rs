//! Property-based tests for build-set selection.
//!
//! These tests verify that:
//! - A change set confined to one project selects exactly that project
//! - Selection never drops below one project and never invents projects
//! - Selection is independent of the order of changed paths

use ciselect_domain::select_build_set;
use ciselect_types::project::ProjectCatalog;
use ciselect_types::selection::SelectionReason;
use proptest::prelude::*;

/// Strategy for repo-relative file names below some directory.
fn arb_rel_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex(r"[a-z][a-z0-9_]{0,8}(/[a-z0-9_]{1,8}){0,2}\.[a-z]{1,3}").unwrap(),
        1..6,
    )
}

/// Strategy for arbitrary change sets mixing project and non-project paths.
fn arb_changes() -> impl Strategy<Value = Vec<String>> {
    let roots = prop::sample::select(vec![
        "backend/api",
        "backend/consumer",
        "frontend",
        "docs",
        "frontend-legacy",
        ".circleci",
    ]);
    prop::collection::vec(
        (roots, prop::string::string_regex(r"[a-z]{1,8}\.[a-z]{1,3}").unwrap())
            .prop_map(|(root, file)| format!("{root}/{file}")),
        0..8,
    )
}

proptest! {
    #[test]
    fn confined_change_selects_exactly_one_project(
        idx in 0usize..3,
        rels in arb_rel_paths(),
    ) {
        let catalog = ProjectCatalog::default();
        let project = &catalog.projects()[idx];
        let changed: Vec<String> = rels
            .iter()
            .map(|r| format!("{}/{}", project.prefix, r))
            .collect();

        let set = select_build_set(&catalog, &changed);
        prop_assert_eq!(set.reason, SelectionReason::Matched);
        prop_assert_eq!(set.prefixes(), vec![project.prefix.clone()]);
    }

    #[test]
    fn selection_is_a_nonempty_subset_of_the_catalog(changed in arb_changes()) {
        let catalog = ProjectCatalog::default();
        let set = select_build_set(&catalog, &changed);

        prop_assert!(!set.projects.is_empty());
        for p in &set.projects {
            prop_assert!(catalog.get(&p.prefix).is_some());
        }
        if set.is_fallback() {
            prop_assert_eq!(set.projects.len(), catalog.len());
        }
    }

    #[test]
    fn selection_ignores_change_order(changed in arb_changes()) {
        let catalog = ProjectCatalog::default();
        let mut reversed = changed.clone();
        reversed.reverse();

        prop_assert_eq!(
            select_build_set(&catalog, &changed),
            select_build_set(&catalog, &reversed)
        );
    }
}
