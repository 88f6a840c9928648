//! Library half of the `ciselect` binary: config file discovery and merging.

pub mod config;
