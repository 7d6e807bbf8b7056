//! Shared test utilities for sail CLI tests.
//!
//! [`FakeDocker`] writes a small `docker` stand-in script that keeps the
//! state of a single container in files, so lifecycle verbs can be driven
//! end to end through `--docker-path` without a daemon.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_DOCKER: &str = r#"#!/bin/sh
state_dir="$FAKE_DOCKER_STATE"
echo "$*" >> "$state_dir/calls"
state=$(cat "$state_dir/state" 2>/dev/null || echo absent)

case "$1" in
  --version)
    echo "Docker version 99.0.0, build fake"
    exit 0
    ;;
  version)
    if [ -f "$state_dir/daemon_down" ]; then
      echo "Cannot connect to the Docker daemon at unix:///var/run/docker.sock. Is the docker daemon running?" >&2
      exit 1
    fi
    echo "99.0.0"
    exit 0
    ;;
  container)
    if [ "$state" = absent ]; then
      echo "Error response from daemon: No such container: $5" >&2
      exit 1
    fi
    echo "$state"
    exit 0
    ;;
  image)
    if [ -f "$state_dir/image" ]; then
      echo "sha256:fake"
      exit 0
    fi
    echo "Error response from daemon: No such image: $5" >&2
    exit 1
    ;;
  build)
    touch "$state_dir/image"
    echo "Successfully built fake"
    exit 0
    ;;
  create)
    if [ "$state" != absent ]; then
      echo "Error response from daemon: Conflict. The container name is already in use" >&2
      exit 1
    fi
    echo created > "$state_dir/state"
    echo "0123456789ab"
    exit 0
    ;;
  start)
    echo running > "$state_dir/state"
    exit 0
    ;;
  stop)
    echo exited > "$state_dir/state"
    exit 0
    ;;
  rm)
    echo absent > "$state_dir/state"
    exit 0
    ;;
  exec)
    shift
    while [ $# -gt 0 ]; do
      case "$1" in
        -i|-t) shift ;;
        *) break ;;
      esac
    done
    shift
    "$@"
    exit $?
    ;;
  logs)
    echo "container log line"
    exit 0
    ;;
esac

echo "fake docker: unexpected arguments: $*" >&2
exit 64
"#;

/// A fake `docker` binary with file-backed container state
pub struct FakeDocker {
    dir: TempDir,
    script: PathBuf,
    project: PathBuf,
}

impl FakeDocker {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("docker");
        fs::write(&script, FAKE_DOCKER).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let project = dir.path().join("project");
        fs::create_dir(&project).unwrap();

        Self {
            dir,
            script,
            project,
        }
    }

    /// Directory `sail` runs in (bind-mounted as the workspace)
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Set the container status reported by `docker container inspect`
    /// (`absent`, `created`, `running`, `exited`)
    pub fn set_state(&self, state: &str) -> &Self {
        fs::write(self.dir.path().join("state"), format!("{}\n", state)).unwrap();
        self
    }

    pub fn state(&self) -> String {
        fs::read_to_string(self.dir.path().join("state"))
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "absent".to_string())
    }

    /// Mark the image as already built
    pub fn with_image(&self) -> &Self {
        fs::write(self.dir.path().join("image"), "").unwrap();
        self
    }

    /// Make `docker version` report an unreachable daemon
    pub fn daemon_down(&self) -> &Self {
        fs::write(self.dir.path().join("daemon_down"), "").unwrap();
        self
    }

    /// Every invocation so far, one argument string per call
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls"))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    pub fn clear_calls(&self) {
        let _ = fs::remove_file(self.dir.path().join("calls"));
    }

    /// Calls whose first argument is `verb`
    pub fn calls_to(&self, verb: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.split_whitespace().next() == Some(verb))
            .collect()
    }

    /// A `sail` command wired to this fake runtime
    pub fn sail(&self) -> Command {
        let mut cmd = Command::cargo_bin("sail").unwrap();
        cmd.current_dir(&self.project)
            .env("FAKE_DOCKER_STATE", self.dir.path())
            .env_remove("SAIL_IMAGE")
            .env_remove("SAIL_CONTAINER")
            .env_remove("SAIL_ENV_FILE")
            .env_remove("SAIL_LOG")
            .env_remove("RUST_LOG")
            .arg("--docker-path")
            .arg(&self.script)
            .arg("--no-tty");
        cmd
    }
}
