//! Error types and handling
//!
//! The error taxonomy is split per domain (configuration, Docker runtime,
//! container state preconditions, git, provisioning) and wrapped in the main
//! [`SailError`] enum for unified handling. Binaries inspect the wrapped
//! variant to choose an exit code.

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file parsing error
    #[error("Failed to parse configuration file {path}: {message}")]
    Parsing { path: String, message: String },

    /// Configuration validation error
    #[error("Configuration validation error: {message}")]
    Validation { message: String },

    /// Configuration file I/O error
    #[error("Failed to read configuration file")]
    Io(#[from] std::io::Error),

    /// Explicitly requested configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },
}

/// Docker runtime errors
#[derive(Error, Debug)]
pub enum DockerError {
    /// Docker is not installed or not accessible
    #[error("Docker is not installed or not accessible")]
    NotInstalled,

    /// The Docker daemon did not answer
    #[error("Cannot connect to the Docker daemon: {0}")]
    DaemonUnreachable(String),

    /// Docker CLI command error
    #[error("Docker CLI error: {0}")]
    CLIError(String),

    /// A named lifecycle step failed
    #[error("Docker {step} step failed: {message}")]
    StepFailed { step: LifecycleStep, message: String },
}

/// Steps of the container lifecycle, used to name the failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStep {
    Build,
    Remove,
    Create,
    Start,
    Stop,
}

impl std::fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Build => "build",
            Self::Remove => "remove",
            Self::Create => "create",
            Self::Start => "start",
            Self::Stop => "stop",
        };
        f.write_str(name)
    }
}

/// Container state precondition errors
#[derive(Error, Debug)]
pub enum StateError {
    /// The verb needs a running container
    #[error("Container '{container}' is not running ({state}). Run `sail start` first.")]
    NotRunning { container: String, state: String },
}

/// Git-related errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Git is not installed or not accessible
    #[error("Git is not installed or not accessible")]
    NotInstalled,

    /// Git CLI command error
    #[error("Git CLI error: {0}")]
    CLIError(String),
}

/// Credential provisioning errors
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Could not determine the home directory for credential files
    #[error("Cannot determine home directory (HOME is unset)")]
    NoHome,

    /// Credential store file I/O error
    #[error("Failed to write credential store {path}: {source}")]
    CredentialStore {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum SailError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Docker runtime errors
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    /// Container state precondition errors
    #[error("{0}")]
    State(#[from] StateError),

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Provisioning errors
    #[error("Provision error: {0}")]
    Provision(#[from] ProvisionError),
}

impl SailError {
    /// Whether the error means the Docker CLI itself is missing
    pub fn is_docker_missing(&self) -> bool {
        matches!(self, SailError::Docker(DockerError::NotInstalled))
    }
}

/// Convenience type alias for Results with SailError
pub type Result<T> = std::result::Result<T, SailError>;
