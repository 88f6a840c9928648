//! Embeddable core library for ciselect.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into a CI bootstrap binary or other host process.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits:
//! - [`GitPort`] - checkout, merge-base, rev-parse, diff
//! - [`TemplateSource`](ports::TemplateSource) - load the CI template
//! - [`WritePort`](ports::WritePort) - write files and create directories
//!
//! The [`adapters`] module provides default filesystem- and shell-backed implementations.
//!
//! # Entry points
//!
//! - [`run_generate`](pipeline::run_generate) - detect changes, select projects, render config
//! - [`run_changes`](pipeline::run_changes) - detect changes only, failing loudly

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the domain's GitPort so callers don't need ciselect-domain directly.
pub use ciselect_domain::GitPort;
