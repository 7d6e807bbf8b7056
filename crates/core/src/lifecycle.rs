//! Container lifecycle controller
//!
//! Maps each [`Verb`] onto runtime operations against the single managed
//! container. Every operation queries the container state immediately before
//! acting; no state is cached between calls or invocations. Operations that
//! need a running container refuse instead of starting it implicitly.

use crate::config::{resolve, SailConfig};
use crate::container::{ContainerIdentity, ContainerState};
use crate::docker::{BindMount, BuildSpec, CreateSpec, Docker, ExecConfig};
use crate::errors::{ConfigError, Result, StateError};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Options for `sail build`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub no_cache: bool,
    pub pull: bool,
}

/// A controller verb with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Build(BuildOptions),
    Start,
    Stop,
    Restart,
    Status,
    Exec(Vec<String>),
    Shell,
    Logs(Vec<String>),
    Python(Vec<String>),
    Pip(Vec<String>),
}

impl Verb {
    /// Command run inside the container for exec-style verbs
    pub fn exec_command(&self) -> Option<Vec<String>> {
        let prefixed = |program: &str, args: &[String]| -> Vec<String> {
            std::iter::once(program.to_string())
                .chain(args.iter().cloned())
                .collect()
        };

        match self {
            Verb::Exec(command) => Some(command.clone()),
            Verb::Shell => Some(vec!["bash".to_string()]),
            Verb::Python(args) => Some(prefixed("python", args)),
            Verb::Pip(args) => Some(prefixed("pip", args)),
            _ => None,
        }
    }
}

/// Result of `start`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The container was already running; nothing changed
    AlreadyRunning,
    /// A fresh container was created and started
    Started {
        container_id: String,
        /// The image was missing and got built first
        built_image: bool,
        /// A stale stopped container was removed first
        replaced_stale: bool,
    },
}

/// Result of `stop`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The running container was stopped
    Stopped,
    /// The container was not running; nothing changed
    NotRunning(ContainerState),
}

/// Result of running a verb
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbOutcome {
    Built,
    Started(StartOutcome),
    Stopped(StopOutcome),
    Restarted {
        stop: StopOutcome,
        start: StartOutcome,
    },
    Status(ContainerState),
    /// An attached command finished with this exit code
    Exited(i32),
}

/// Lifecycle controller over a container runtime
#[derive(Debug)]
pub struct LifecycleController<D> {
    docker: D,
    config: SailConfig,
    working_dir: PathBuf,
    exec_config: ExecConfig,
}

impl<D: Docker> LifecycleController<D> {
    pub fn new(docker: D, config: SailConfig, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            docker,
            config,
            working_dir: working_dir.into(),
            exec_config: ExecConfig::for_terminal(true, false, false),
        }
    }

    /// Set the TTY/stdin behavior used by exec-style verbs
    pub fn with_exec_config(mut self, exec_config: ExecConfig) -> Self {
        self.exec_config = exec_config;
        self
    }

    pub fn identity(&self) -> ContainerIdentity {
        self.config.identity()
    }

    /// Run a verb
    #[instrument(skip(self), fields(container = %self.config.container_name))]
    pub async fn run(&self, verb: Verb) -> Result<VerbOutcome> {
        match verb {
            Verb::Build(options) => self.build(options).await.map(|_| VerbOutcome::Built),
            Verb::Start => self.start().await.map(VerbOutcome::Started),
            Verb::Stop => self.stop().await.map(VerbOutcome::Stopped),
            Verb::Restart => {
                let (stop, start) = self.restart().await?;
                Ok(VerbOutcome::Restarted { stop, start })
            }
            Verb::Status => self.state().await.map(VerbOutcome::Status),
            Verb::Logs(args) => self.logs(&args).await.map(VerbOutcome::Exited),
            Verb::Exec(_) | Verb::Shell | Verb::Python(_) | Verb::Pip(_) => {
                let command = verb.exec_command().unwrap_or_default();
                self.exec(&command).await.map(VerbOutcome::Exited)
            }
        }
    }

    /// Query the container state from the runtime
    pub async fn state(&self) -> Result<ContainerState> {
        self.docker.container_state(&self.config.container_name).await
    }

    /// Build the image from the configured context
    #[instrument(skip(self))]
    pub async fn build(&self, options: BuildOptions) -> Result<()> {
        let spec = self.build_spec(options);
        info!("Building image {}", spec.image);
        self.docker.build_image(&spec).await
    }

    /// Ensure exactly one running container with the managed name
    ///
    /// A stopped container is removed and recreated so the current mounts and
    /// env file always apply.
    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<StartOutcome> {
        let name = &self.config.container_name;
        let state = self.state().await?;
        debug!("Container {} is {}", name, state);

        let replaced_stale = match state {
            ContainerState::Running => {
                info!("Container {} is already running", name);
                return Ok(StartOutcome::AlreadyRunning);
            }
            ContainerState::Stopped => {
                info!("Removing stale container {}", name);
                self.docker.remove_container(name).await?;
                true
            }
            ContainerState::Absent => false,
        };

        let built_image = if self.docker.image_exists(&self.config.image).await? {
            false
        } else {
            info!("Image {} not found; building it", self.config.image);
            self.build(BuildOptions::default()).await?;
            true
        };

        let spec = self.create_spec();
        let container_id = self.docker.create_container(&spec).await?;
        self.docker.start_container(name).await?;
        info!("Started container {} ({})", name, container_id);

        Ok(StartOutcome::Started {
            container_id,
            built_image,
            replaced_stale,
        })
    }

    /// Stop the container if it is running
    #[instrument(skip(self))]
    pub async fn stop(&self) -> Result<StopOutcome> {
        let name = &self.config.container_name;
        let state = self.state().await?;

        if !state.is_running() {
            info!("Container {} is not running ({})", name, state);
            return Ok(StopOutcome::NotRunning(state));
        }

        self.docker.stop_container(name, None).await?;
        info!("Stopped container {}", name);
        Ok(StopOutcome::Stopped)
    }

    /// Stop then start
    pub async fn restart(&self) -> Result<(StopOutcome, StartOutcome)> {
        let stop = self.stop().await?;
        let start = self.start().await?;
        Ok((stop, start))
    }

    /// Run a command in the running container and return its exit code
    #[instrument(skip(self))]
    pub async fn exec(&self, command: &[String]) -> Result<i32> {
        if command.is_empty() {
            return Err(ConfigError::Validation {
                message: "exec requires a command".to_string(),
            }
            .into());
        }

        self.require_running().await?;
        let code = self
            .docker
            .exec(&self.config.container_name, command, self.exec_config)
            .await?;
        debug!("Command exited with code {}", code);
        Ok(code)
    }

    /// Print container logs; `args` pass through to the runtime
    #[instrument(skip(self))]
    pub async fn logs(&self, args: &[String]) -> Result<i32> {
        self.require_running().await?;
        self.docker.logs(&self.config.container_name, args).await
    }

    async fn require_running(&self) -> Result<()> {
        let state = self.state().await?;
        if state.is_running() {
            return Ok(());
        }
        Err(StateError::NotRunning {
            container: self.config.container_name.clone(),
            state: state.to_string(),
        }
        .into())
    }

    fn build_spec(&self, options: BuildOptions) -> BuildSpec {
        BuildSpec {
            image: self.config.image.clone(),
            dockerfile: resolve(&self.working_dir, &self.config.dockerfile),
            context: resolve(&self.working_dir, &self.config.context),
            no_cache: options.no_cache,
            pull: options.pull,
        }
    }

    /// Container creation parameters for the current working directory
    pub fn create_spec(&self) -> CreateSpec {
        let mut mounts = vec![BindMount::new(
            self.working_dir.clone(),
            self.config.workspace_target.clone(),
        )];

        let socket = &self.config.docker_socket;
        if socket.exists() {
            mounts.push(BindMount::new(
                socket.clone(),
                socket.display().to_string(),
            ));
        } else {
            warn!(
                "Docker socket {} not found; container will not have Docker access",
                socket.display()
            );
        }

        let env_file = resolve(&self.working_dir, &self.config.env_file);
        let env_file = if env_file.is_file() {
            Some(env_file)
        } else {
            warn!(
                "Env file {} not found; starting without credentials",
                env_file.display()
            );
            None
        };

        CreateSpec {
            name: self.config.container_name.clone(),
            image: self.config.image.clone(),
            mounts,
            env_file,
            working_dir: Some(self.config.workspace_target.clone()),
            command: self.config.keepalive.clone(),
        }
    }
}
