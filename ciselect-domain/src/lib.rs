//! Domain logic: turn a head commit + base revision into the set of projects to build.
//!
//! This crate owns *what* changed and *which* pipelines that implies. It does not own *how* git
//! is invoked; that's the `ciselect-git` crate.

mod detect;
mod ports;
mod select;

pub use detect::{DetectError, Detection, detect_changes, detect_changes_or_empty};
pub use ports::GitPort;
pub use select::{path_matches_prefix, select_build_set};
