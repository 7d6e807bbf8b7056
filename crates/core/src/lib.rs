//! Core library for `sail`
//!
//! This crate contains the shared logic behind the `sail` lifecycle controller
//! and the `sail-provision` container entrypoint: configuration resolution,
//! Docker integration, container lifecycle, git credential provisioning,
//! process plumbing, logging, redaction, and error handling.

pub mod config;
pub mod container;
pub mod docker;
pub mod errors;
pub mod git;
pub mod lifecycle;
pub mod logging;
pub mod process;
pub mod provision;
pub mod redaction;

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
