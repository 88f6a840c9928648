//! Shared DTOs for the ciselect workspace.
//!
//! # Design constraints
//! - `SelectionReport` is serialized to disk and read by other tooling.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod change;
pub mod project;
pub mod selection;

/// Schema identifiers.
pub mod schema {
    pub const CISELECT_SELECTION_V1: &str = "ciselect.selection.v1";
}

/// Hash of the empty git tree. Diffing against it lists every file in a commit.
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Branch the pipeline compares against when nothing else is configured.
pub const DEFAULT_BASE_REVISION: &str = "main";
