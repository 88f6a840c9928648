#![no_main]

//! Fuzz target for template rendering against the default catalog.

use ciselect_domain::select_build_set;
use ciselect_render::{RenderContext, render_str};
use ciselect_types::project::ProjectCatalog;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let catalog = ProjectCatalog::default();
    let build_set = select_build_set(&catalog, &["frontend/app.js".to_string()]);
    let ctx = RenderContext::new(&catalog, &build_set, "main").with_range("base", "head");

    // Errors are fine; panics are not.
    if let Ok(out) = render_str("fuzz", source, &ctx) {
        if source.ends_with('\n') {
            assert!(out.ends_with('\n'));
        }
    }
});
