//! Container entrypoint: provision credentials, then become the requested
//! command.
//!
//! Arguments are taken verbatim as the command line to exec, so no option
//! parsing happens here. Logging goes to stderr at `info` unless `SAIL_LOG`
//! or `RUST_LOG` say otherwise.

use sail_core::git::GitCli;
use sail_core::process::{exec_replace, exit_code_for_spawn_error};
use sail_core::provision::{apply_credentials, CredentialSet, ENV_PROVISION_SKIP};
use sail_core::redaction::global_registry;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, info};

fn main() {
    if let Err(e) = sail_core::logging::init(None, "info") {
        eprintln!("sail-provision: failed to initialize logging: {}", e);
    }

    if std::env::var(ENV_PROVISION_SKIP).is_ok_and(|v| v == "1") {
        info!("{} is set, skipping provisioning", ENV_PROVISION_SKIP);
    } else {
        provision();
    }

    let mut argv = std::env::args_os().skip(1);
    let Some(program) = argv.next() else {
        debug!("No command given, exiting");
        std::process::exit(0);
    };
    let args: Vec<OsString> = argv.collect();

    let err = exec_replace(&program, &args);
    eprintln!(
        "sail-provision: {}: {}",
        program.to_string_lossy(),
        err
    );
    std::process::exit(exit_code_for_spawn_error(&err));
}

fn provision() {
    let credentials = CredentialSet::from_env();
    if credentials.is_empty() {
        debug!("No credentials in environment");
        return;
    }

    let home = std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from);
    let git = GitCli::global();

    let report = apply_credentials(&credentials, &git, home.as_deref(), global_registry());
    debug!("Provisioning finished: {:?}", report);
}
