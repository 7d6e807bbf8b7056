//! Docker CLI integration
//!
//! This module abstracts the container runtime behind the [`Docker`] trait and
//! provides [`CliRuntime`], an implementation that shells out to the `docker`
//! binary. Every state query goes to the daemon; nothing is cached.
//!
//! Output-capturing calls run on the blocking pool. Attached calls (`build`,
//! `exec`, `logs`) inherit the terminal and are awaited with
//! [`crate::process::run_attached`] so the child, not `sail`, handles
//! terminal interrupts.

use crate::container::ContainerState;
use crate::errors::{DockerError, LifecycleStep, Result};
use crate::process::{exit_code_of, run_attached};
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, instrument};

/// Substrings Docker prints when the daemon cannot be reached
const DAEMON_UNREACHABLE_PATTERNS: &[&str] = &[
    "Cannot connect to the Docker daemon",
    "Is the docker daemon running",
    "error during connect",
];

/// Substrings Docker prints when an object does not exist
const NOT_FOUND_PATTERNS: &[&str] = &["No such object", "No such container", "No such image"];

fn is_daemon_unreachable(stderr: &str) -> bool {
    DAEMON_UNREACHABLE_PATTERNS.iter().any(|p| stderr.contains(p))
}

fn is_not_found(stderr: &str) -> bool {
    NOT_FOUND_PATTERNS.iter().any(|p| stderr.contains(p))
}

/// Classify a failed runtime invocation into a [`DockerError`]
fn step_failure(step: LifecycleStep, stderr: &str) -> DockerError {
    let message = stderr.trim().to_string();
    if is_daemon_unreachable(&message) {
        DockerError::DaemonUnreachable(message)
    } else {
        DockerError::StepFailed { step, message }
    }
}

/// Bind mount passed to `docker create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    /// Host path
    pub source: PathBuf,
    /// Container path
    pub target: String,
}

impl BindMount {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Render as `--mount` arguments
    pub fn to_docker_args(&self) -> Vec<String> {
        vec![
            "--mount".to_string(),
            format!(
                "type=bind,source={},target={}",
                self.source.display(),
                self.target
            ),
        ]
    }
}

/// Parameters for `docker build`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSpec {
    /// Tag applied to the built image
    pub image: String,
    /// Dockerfile path
    pub dockerfile: PathBuf,
    /// Build context directory
    pub context: PathBuf,
    /// Build without cache
    pub no_cache: bool,
    /// Always pull newer base images
    pub pull: bool,
}

impl BuildSpec {
    /// Arguments passed to the runtime binary
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "--tag".to_string(),
            self.image.clone(),
            "--file".to_string(),
            self.dockerfile.display().to_string(),
        ];
        if self.no_cache {
            args.push("--no-cache".to_string());
        }
        if self.pull {
            args.push("--pull".to_string());
        }
        args.push(self.context.display().to_string());
        args
    }
}

/// Parameters for `docker create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpec {
    /// Container name
    pub name: String,
    /// Image tag
    pub image: String,
    /// Bind mounts (working directory, Docker socket)
    pub mounts: Vec<BindMount>,
    /// Env file loaded into the container environment
    pub env_file: Option<PathBuf>,
    /// Working directory inside the container
    pub working_dir: Option<String>,
    /// Command handed to the image entrypoint
    pub command: Vec<String>,
}

impl CreateSpec {
    /// Arguments passed to the runtime binary
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            "--name".to_string(),
            self.name.clone(),
        ];

        for mount in &self.mounts {
            args.extend(mount.to_docker_args());
        }

        if let Some(ref env_file) = self.env_file {
            args.push("--env-file".to_string());
            args.push(env_file.display().to_string());
        }

        if let Some(ref working_dir) = self.working_dir {
            args.push("--workdir".to_string());
            args.push(working_dir.clone());
        }

        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

/// Configuration for executing commands in the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    /// Whether to allocate a TTY
    pub tty: bool,
    /// Whether to attach stdin
    pub interactive: bool,
}

impl ExecConfig {
    /// Decide TTY allocation from the terminal situation
    ///
    /// A PTY is allocated only when not disabled and both stdin and stdout
    /// are terminals. stdin is always attached so piped input reaches the
    /// command.
    pub fn for_terminal(no_tty: bool, stdin_is_tty: bool, stdout_is_tty: bool) -> Self {
        Self {
            tty: !no_tty && stdin_is_tty && stdout_is_tty,
            interactive: true,
        }
    }

    /// Detect terminals on the current process
    pub fn detect(no_tty: bool) -> Self {
        use std::io::IsTerminal;
        Self::for_terminal(
            no_tty,
            std::io::stdin().is_terminal(),
            std::io::stdout().is_terminal(),
        )
    }

    /// Render as `docker exec` flags
    pub fn to_docker_args(self) -> Vec<String> {
        let mut args = Vec::new();
        if self.interactive {
            args.push("-i".to_string());
        }
        if self.tty {
            args.push("-t".to_string());
        }
        args
    }
}

/// Container runtime abstraction
///
/// Attached operations return the exit code of the runtime process so
/// callers can propagate it unchanged.
#[allow(async_fn_in_trait)]
pub trait Docker {
    /// Health check for daemon availability
    async fn ping(&self) -> Result<()>;

    /// Current state of the named container
    async fn container_state(&self, name: &str) -> Result<ContainerState>;

    /// Whether an image with the given tag exists locally
    async fn image_exists(&self, image: &str) -> Result<bool>;

    /// Build an image, streaming output to the terminal
    async fn build_image(&self, spec: &BuildSpec) -> Result<()>;

    /// Create a container, returning its ID
    async fn create_container(&self, spec: &CreateSpec) -> Result<String>;

    /// Start an existing container
    async fn start_container(&self, name: &str) -> Result<()>;

    /// Stop a running container
    async fn stop_container(&self, name: &str, timeout: Option<u32>) -> Result<()>;

    /// Remove a container (forcefully)
    async fn remove_container(&self, name: &str) -> Result<()>;

    /// Run a command in the container attached to the terminal
    async fn exec(&self, name: &str, command: &[String], config: ExecConfig) -> Result<i32>;

    /// Print container logs, passing `args` through to the runtime
    async fn logs(&self, name: &str, args: &[String]) -> Result<i32>;
}

/// CLI-based container runtime implementation
#[derive(Debug, Clone)]
pub struct CliRuntime {
    /// Runtime binary path (e.g. "docker")
    runtime_path: String,
}

impl CliRuntime {
    /// Create a runtime using `docker` from PATH
    pub fn docker() -> Self {
        Self::with_runtime_path("docker".to_string())
    }

    /// Create a runtime with a custom binary path
    pub fn with_runtime_path(runtime_path: String) -> Self {
        Self { runtime_path }
    }

    /// Check that the runtime binary is available
    #[instrument(skip(self))]
    pub fn check_runtime_installed(&self) -> Result<()> {
        debug!(
            "Checking if container runtime binary is installed at: {}",
            self.runtime_path
        );

        match Command::new(&self.runtime_path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                debug!("Container runtime binary found and working");
                Ok(())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(DockerError::CLIError(format!("Runtime version check failed: {}", stderr)).into())
            }
            Err(e) => {
                debug!("Container runtime binary not found: {}", e);
                Err(DockerError::NotInstalled.into())
            }
        }
    }

    /// Run the runtime with captured output on the blocking pool
    async fn capture(&self, args: Vec<String>) -> Result<std::process::Output> {
        let runtime_path = self.runtime_path.clone();
        debug!("Executing runtime command: {} {}", runtime_path, args.join(" "));

        tokio::task::spawn_blocking(move || Command::new(&runtime_path).args(&args).output())
            .await
            .map_err(|e| DockerError::CLIError(format!("Task join error: {}", e)))?
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DockerError::NotInstalled.into(),
                _ => DockerError::CLIError(format!("Failed to execute runtime command: {}", e))
                    .into(),
            })
    }

    /// Run the runtime attached to the terminal and return its exit code
    async fn attached(&self, args: Vec<String>) -> Result<i32> {
        debug!(
            "Executing attached runtime command: {} {}",
            self.runtime_path,
            args.join(" ")
        );

        let mut command = tokio::process::Command::new(&self.runtime_path);
        command.args(&args);

        let status = run_attached(command).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DockerError::NotInstalled,
            _ => DockerError::CLIError(format!("Failed to run runtime command: {}", e)),
        })?;

        Ok(exit_code_of(status))
    }

    /// Run a lifecycle step with captured output, mapping failure to the step
    async fn step(&self, step: LifecycleStep, args: Vec<String>) -> Result<String> {
        let output = self.capture(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(step_failure(step, &stderr).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::docker()
    }
}

impl Docker for CliRuntime {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<()> {
        let output = self
            .capture(vec![
                "version".to_string(),
                "--format".to_string(),
                "{{.Server.Version}}".to_string(),
            ])
            .await?;

        if output.status.success() {
            debug!("Container runtime daemon is available");
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(DockerError::DaemonUnreachable(stderr.trim().to_string()).into())
        }
    }

    #[instrument(skip(self))]
    async fn container_state(&self, name: &str) -> Result<ContainerState> {
        let output = self
            .capture(vec![
                "container".to_string(),
                "inspect".to_string(),
                "--format".to_string(),
                "{{.State.Status}}".to_string(),
                name.to_string(),
            ])
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_not_found(&stderr) {
                debug!("Container {} does not exist", name);
                return Ok(ContainerState::Absent);
            }
            if is_daemon_unreachable(&stderr) {
                return Err(DockerError::DaemonUnreachable(stderr.trim().to_string()).into());
            }
            return Err(DockerError::CLIError(format!("Inspect command failed: {}", stderr)).into());
        }

        let status = String::from_utf8_lossy(&output.stdout);
        let state = ContainerState::from_docker_status(&status);
        debug!("Container {} status '{}' -> {}", name, status.trim(), state);
        Ok(state)
    }

    #[instrument(skip(self))]
    async fn image_exists(&self, image: &str) -> Result<bool> {
        let output = self
            .capture(vec![
                "image".to_string(),
                "inspect".to_string(),
                "--format".to_string(),
                "{{.Id}}".to_string(),
                image.to_string(),
            ])
            .await?;

        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if is_daemon_unreachable(&stderr) {
            return Err(DockerError::DaemonUnreachable(stderr.trim().to_string()).into());
        }
        // Docker reports a missing image with a non-zero exit
        Ok(false)
    }

    #[instrument(skip(self))]
    async fn build_image(&self, spec: &BuildSpec) -> Result<()> {
        let code = self.attached(spec.to_args()).await?;
        if code != 0 {
            return Err(DockerError::StepFailed {
                step: LifecycleStep::Build,
                message: format!("docker build exited with code {}", code),
            }
            .into());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_container(&self, spec: &CreateSpec) -> Result<String> {
        let container_id = self.step(LifecycleStep::Create, spec.to_args()).await?;
        debug!("Created container with ID: {}", container_id);
        Ok(container_id)
    }

    #[instrument(skip(self))]
    async fn start_container(&self, name: &str) -> Result<()> {
        self.step(
            LifecycleStep::Start,
            vec!["start".to_string(), name.to_string()],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop_container(&self, name: &str, timeout: Option<u32>) -> Result<()> {
        let mut args = vec!["stop".to_string()];
        if let Some(timeout) = timeout {
            args.push("--time".to_string());
            args.push(timeout.to_string());
        }
        args.push(name.to_string());

        self.step(LifecycleStep::Stop, args).await?;
        debug!("Container {} stopped successfully", name);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_container(&self, name: &str) -> Result<()> {
        self.step(
            LifecycleStep::Remove,
            vec!["rm".to_string(), "--force".to_string(), name.to_string()],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self, command))]
    async fn exec(&self, name: &str, command: &[String], config: ExecConfig) -> Result<i32> {
        let mut args = vec!["exec".to_string()];
        args.extend(config.to_docker_args());
        args.push(name.to_string());
        args.extend(command.iter().cloned());

        self.attached(args).await
    }

    #[instrument(skip(self))]
    async fn logs(&self, name: &str, args: &[String]) -> Result<i32> {
        let mut full = vec!["logs".to_string()];
        full.extend(args.iter().cloned());
        full.push(name.to_string());

        self.attached(full).await
    }
}

pub mod mock {
    //! Mock Docker runtime for testing lifecycle flows
    //!
    //! Simulates a daemon holding containers and images in memory, including
    //! Docker's container-name uniqueness. Every call is recorded so tests can
    //! assert which operations ran (and which did not).

    use crate::container::ContainerState;
    use crate::docker::{BuildSpec, CreateSpec, Docker, ExecConfig};
    use crate::errors::{DockerError, LifecycleStep, Result};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use tracing::debug;

    /// Record of a runtime call for verification in tests
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MockCall {
        Ping,
        State(String),
        ImageExists(String),
        Build(BuildSpec),
        Create(CreateSpec),
        Start(String),
        Stop(String),
        Remove(String),
        Exec {
            name: String,
            command: Vec<String>,
            config: ExecConfig,
        },
        Logs {
            name: String,
            args: Vec<String>,
        },
    }

    /// Configuration for the MockDocker runtime
    #[derive(Debug, Clone, Default)]
    pub struct MockDockerConfig {
        /// Simulate an unreachable daemon
        pub daemon_unavailable: bool,
        /// Lifecycle step that fails when attempted
        pub failing_step: Option<LifecycleStep>,
        /// Exit code returned by exec and logs
        pub exec_exit_code: i32,
    }

    #[derive(Debug, Default)]
    struct MockState {
        containers: HashMap<String, ContainerState>,
        images: HashSet<String>,
        next_id: u32,
    }

    /// Mock Docker runtime implementation
    #[derive(Debug, Clone, Default)]
    pub struct MockDocker {
        config: Arc<Mutex<MockDockerConfig>>,
        state: Arc<Mutex<MockState>>,
        calls: Arc<Mutex<Vec<MockCall>>>,
    }

    impl MockDocker {
        /// Create a new MockDocker instance with default configuration
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a new MockDocker instance with custom configuration
        pub fn with_config(config: MockDockerConfig) -> Self {
            Self {
                config: Arc::new(Mutex::new(config)),
                ..Self::default()
            }
        }

        /// Update mock configuration
        pub fn update_config<F>(&self, f: F)
        where
            F: FnOnce(&mut MockDockerConfig),
        {
            let mut config = self.config.lock().unwrap();
            f(&mut config);
        }

        /// Register a locally available image
        pub fn add_image(&self, image: &str) {
            self.state.lock().unwrap().images.insert(image.to_string());
        }

        /// Place a container in the given state
        pub fn set_container(&self, name: &str, state: ContainerState) {
            let mut inner = self.state.lock().unwrap();
            match state {
                ContainerState::Absent => {
                    inner.containers.remove(name);
                }
                other => {
                    inner.containers.insert(name.to_string(), other);
                }
            }
        }

        /// Current simulated state of a container
        pub fn state_of(&self, name: &str) -> ContainerState {
            self.state
                .lock()
                .unwrap()
                .containers
                .get(name)
                .copied()
                .unwrap_or(ContainerState::Absent)
        }

        /// Number of containers in the simulated daemon
        pub fn container_count(&self) -> usize {
            self.state.lock().unwrap().containers.len()
        }

        /// All calls made so far
        pub fn calls(&self) -> Vec<MockCall> {
            self.calls.lock().unwrap().clone()
        }

        /// Clear recorded calls
        pub fn clear_calls(&self) {
            self.calls.lock().unwrap().clear();
        }

        fn record(&self, call: MockCall) -> Result<()> {
            debug!("MockDocker call: {:?}", call);
            self.calls.lock().unwrap().push(call);
            if self.config.lock().unwrap().daemon_unavailable {
                return Err(DockerError::DaemonUnreachable(
                    "Cannot connect to the Docker daemon (mock)".to_string(),
                )
                .into());
            }
            Ok(())
        }

        fn check_step(&self, step: LifecycleStep) -> Result<()> {
            if self.config.lock().unwrap().failing_step == Some(step) {
                return Err(DockerError::StepFailed {
                    step,
                    message: "simulated failure".to_string(),
                }
                .into());
            }
            Ok(())
        }

        fn require_running(&self, name: &str) -> Result<()> {
            if self.state_of(name) != ContainerState::Running {
                return Err(DockerError::CLIError(format!(
                    "Error response from daemon: container {} is not running",
                    name
                ))
                .into());
            }
            Ok(())
        }
    }

    impl Docker for MockDocker {
        async fn ping(&self) -> Result<()> {
            self.record(MockCall::Ping)
        }

        async fn container_state(&self, name: &str) -> Result<ContainerState> {
            self.record(MockCall::State(name.to_string()))?;
            Ok(self.state_of(name))
        }

        async fn image_exists(&self, image: &str) -> Result<bool> {
            self.record(MockCall::ImageExists(image.to_string()))?;
            Ok(self.state.lock().unwrap().images.contains(image))
        }

        async fn build_image(&self, spec: &BuildSpec) -> Result<()> {
            self.record(MockCall::Build(spec.clone()))?;
            self.check_step(LifecycleStep::Build)?;
            self.add_image(&spec.image);
            Ok(())
        }

        async fn create_container(&self, spec: &CreateSpec) -> Result<String> {
            self.record(MockCall::Create(spec.clone()))?;
            self.check_step(LifecycleStep::Create)?;

            let mut inner = self.state.lock().unwrap();
            if inner.containers.contains_key(&spec.name) {
                return Err(DockerError::StepFailed {
                    step: LifecycleStep::Create,
                    message: format!(
                        "Conflict. The container name \"/{}\" is already in use",
                        spec.name
                    ),
                }
                .into());
            }
            if !inner.images.contains(&spec.image) {
                return Err(DockerError::StepFailed {
                    step: LifecycleStep::Create,
                    message: format!("No such image: {}", spec.image),
                }
                .into());
            }
            inner
                .containers
                .insert(spec.name.clone(), ContainerState::Stopped);
            inner.next_id += 1;
            Ok(format!("mock-{:04}", inner.next_id))
        }

        async fn start_container(&self, name: &str) -> Result<()> {
            self.record(MockCall::Start(name.to_string()))?;
            self.check_step(LifecycleStep::Start)?;

            let mut inner = self.state.lock().unwrap();
            match inner.containers.get_mut(name) {
                Some(state) => {
                    *state = ContainerState::Running;
                    Ok(())
                }
                None => Err(DockerError::StepFailed {
                    step: LifecycleStep::Start,
                    message: format!("No such container: {}", name),
                }
                .into()),
            }
        }

        async fn stop_container(&self, name: &str, _timeout: Option<u32>) -> Result<()> {
            self.record(MockCall::Stop(name.to_string()))?;
            self.check_step(LifecycleStep::Stop)?;

            if let Some(state) = self.state.lock().unwrap().containers.get_mut(name) {
                *state = ContainerState::Stopped;
            }
            Ok(())
        }

        async fn remove_container(&self, name: &str) -> Result<()> {
            self.record(MockCall::Remove(name.to_string()))?;
            self.check_step(LifecycleStep::Remove)?;
            self.state.lock().unwrap().containers.remove(name);
            Ok(())
        }

        async fn exec(&self, name: &str, command: &[String], config: ExecConfig) -> Result<i32> {
            self.record(MockCall::Exec {
                name: name.to_string(),
                command: command.to_vec(),
                config,
            })?;
            self.require_running(name)?;
            Ok(self.config.lock().unwrap().exec_exit_code)
        }

        async fn logs(&self, name: &str, args: &[String]) -> Result<i32> {
            self.record(MockCall::Logs {
                name: name.to_string(),
                args: args.to_vec(),
            })?;
            if self.state_of(name) == ContainerState::Absent {
                return Err(DockerError::CLIError(format!("No such container: {}", name)).into());
            }
            Ok(self.config.lock().unwrap().exec_exit_code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failure_classification() {
        let err = step_failure(
            LifecycleStep::Start,
            "Cannot connect to the Docker daemon at unix:///var/run/docker.sock.",
        );
        assert!(matches!(err, DockerError::DaemonUnreachable(_)));

        let err = step_failure(LifecycleStep::Create, "Conflict. name in use\n");
        match err {
            DockerError::StepFailed { step, message } => {
                assert_eq!(step, LifecycleStep::Create);
                assert_eq!(message, "Conflict. name in use");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_args() {
        let spec = CreateSpec {
            name: "sail-dev".to_string(),
            image: "sail-dev:latest".to_string(),
            mounts: vec![
                BindMount::new("/home/dev/project", "/workspace"),
                BindMount::new("/var/run/docker.sock", "/var/run/docker.sock"),
            ],
            env_file: Some(PathBuf::from("/home/dev/project/.env")),
            working_dir: Some("/workspace".to_string()),
            command: vec!["sleep".to_string(), "infinity".to_string()],
        };

        assert_eq!(
            spec.to_args(),
            vec![
                "create",
                "--name",
                "sail-dev",
                "--mount",
                "type=bind,source=/home/dev/project,target=/workspace",
                "--mount",
                "type=bind,source=/var/run/docker.sock,target=/var/run/docker.sock",
                "--env-file",
                "/home/dev/project/.env",
                "--workdir",
                "/workspace",
                "sail-dev:latest",
                "sleep",
                "infinity",
            ]
        );
    }

    #[test]
    fn test_build_args() {
        let spec = BuildSpec {
            image: "sail-dev:latest".to_string(),
            dockerfile: PathBuf::from("Dockerfile"),
            context: PathBuf::from("."),
            no_cache: true,
            pull: false,
        };
        assert_eq!(
            spec.to_args(),
            vec![
                "build",
                "--tag",
                "sail-dev:latest",
                "--file",
                "Dockerfile",
                "--no-cache",
                "."
            ]
        );
    }

    #[test]
    fn test_exec_config_tty_decision() {
        assert!(ExecConfig::for_terminal(false, true, true).tty);
        assert!(!ExecConfig::for_terminal(true, true, true).tty);
        assert!(!ExecConfig::for_terminal(false, false, true).tty);
        assert!(!ExecConfig::for_terminal(false, true, false).tty);

        let config = ExecConfig::for_terminal(false, true, true);
        assert_eq!(config.to_docker_args(), vec!["-i", "-t"]);
        let config = ExecConfig::for_terminal(true, true, true);
        assert_eq!(config.to_docker_args(), vec!["-i"]);
    }

    #[test]
    fn test_missing_runtime_binary() {
        let runtime = CliRuntime::with_runtime_path("/nonexistent/docker-binary".to_string());
        let err = runtime.check_runtime_installed().unwrap_err();
        assert!(err.is_docker_missing());
    }
}
