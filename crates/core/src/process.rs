//! Process plumbing shared by the controller and the provisioner
//!
//! - [`run_attached`] runs a child on the caller's terminal and waits for it
//!   while keeping terminal interrupts from terminating the parent first.
//! - [`exec_replace`] replaces the current process image (Unix) so signals
//!   and the exit status belong to the target command, not a wrapper.
//! - [`exit_code_of`] and [`exit_code_for_spawn_error`] translate outcomes to
//!   the exit codes a shell would report.

use std::ffi::OsString;
use std::io;
use std::process::ExitStatus;
use tracing::debug;

/// Exit code a shell reports when a command cannot be found
pub const EXIT_COMMAND_NOT_FOUND: i32 = 127;
/// Exit code a shell reports when a command is found but not executable
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Translate an exit status into a process exit code
///
/// A child terminated by a signal maps to `128 + signal`.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// Exit code for a command that could not be started
pub fn exit_code_for_spawn_error(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => EXIT_COMMAND_NOT_FOUND,
        io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
        _ => 1,
    }
}

/// Spawn `command` with inherited stdio and wait for it
///
/// The child shares the terminal's foreground process group, so an interrupt
/// typed at the terminal reaches it directly. The parent swallows its own
/// copy of the interrupt and keeps waiting, which makes the child's exit
/// status the one that is reported.
pub async fn run_attached(mut command: tokio::process::Command) -> io::Result<ExitStatus> {
    command
        .stdin(std::process::Stdio::inherit())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit());

    let mut child = command.spawn()?;

    loop {
        tokio::select! {
            status = child.wait() => return status,
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    debug!("Interrupt listener unavailable: {}", e);
                    return child.wait().await;
                }
                debug!("Interrupt received; waiting for attached process to exit");
            }
        }
    }
}

/// Replace the current process with `program args...`
///
/// Only returns on failure, with the error that prevented the exec.
#[cfg(unix)]
pub fn exec_replace(program: &OsString, args: &[OsString]) -> io::Error {
    use std::os::unix::process::CommandExt;

    debug!("Replacing process image with {:?}", program);
    std::process::Command::new(program).args(args).exec()
}

/// Fallback without process-image replacement: run the command as a child
/// and exit with its exact code
#[cfg(not(unix))]
pub fn exec_replace(program: &OsString, args: &[OsString]) -> io::Error {
    debug!("Running {:?} as a child process", program);
    match std::process::Command::new(program).args(args).status() {
        Ok(status) => std::process::exit(exit_code_of(status)),
        Err(e) => e,
    }
}
