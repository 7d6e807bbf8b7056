//! Configuration resolution and parsing
//!
//! `sail` manages exactly one image and one container per project. Their names
//! and the parameters used to create the container come from a small layered
//! configuration:
//!
//! 1. Built-in defaults
//! 2. `sail.toml` in the working directory, or an explicit `--config` path
//! 3. Environment overrides (`SAIL_IMAGE`, `SAIL_CONTAINER`, `SAIL_ENV_FILE`)
//!
//! ## Example
//!
//! ```toml
//! image = "agents-lab:latest"
//! container_name = "agents-lab"
//! env_file = ".env"
//! workspace_target = "/workspace"
//! ```

use crate::container::ContainerIdentity;
use crate::errors::{ConfigError, Result, SailError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Name of the configuration file discovered in the working directory
pub const CONFIG_FILE_NAME: &str = "sail.toml";

/// Environment variable overriding the image name
pub const ENV_IMAGE: &str = "SAIL_IMAGE";
/// Environment variable overriding the container name
pub const ENV_CONTAINER: &str = "SAIL_CONTAINER";
/// Environment variable overriding the env file path
pub const ENV_ENV_FILE: &str = "SAIL_ENV_FILE";

/// Resolved controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SailConfig {
    /// Image tag built by `sail build` and used by `sail start`
    pub image: String,
    /// Fixed container name
    pub container_name: String,
    /// Build context directory
    pub context: PathBuf,
    /// Dockerfile path, relative to the working directory
    pub dockerfile: PathBuf,
    /// Env file loaded into the container when it exists
    pub env_file: PathBuf,
    /// Mount target of the working directory inside the container
    pub workspace_target: String,
    /// Host Docker socket forwarded into the container
    pub docker_socket: PathBuf,
    /// Command that keeps the container alive after the entrypoint ran
    pub keepalive: Vec<String>,
}

impl Default for SailConfig {
    fn default() -> Self {
        Self {
            image: "sail-dev:latest".to_string(),
            container_name: "sail-dev".to_string(),
            context: PathBuf::from("."),
            dockerfile: PathBuf::from("Dockerfile"),
            env_file: PathBuf::from(".env"),
            workspace_target: "/workspace".to_string(),
            docker_socket: PathBuf::from("/var/run/docker.sock"),
            keepalive: vec!["sleep".to_string(), "infinity".to_string()],
        }
    }
}

impl SailConfig {
    /// Load configuration for `working_dir`
    ///
    /// When `explicit` is given the file must exist. Otherwise `sail.toml` in
    /// the working directory is used if present, and defaults apply if not.
    /// Environment overrides are read from the process environment.
    #[instrument(skip_all)]
    pub fn load(working_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(working_dir, explicit, &env)
    }

    /// Same as [`SailConfig::load`] with an explicit environment map
    pub fn load_with_env(
        working_dir: &Path,
        explicit: Option<&Path>,
        env: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                let path = resolve(working_dir, path);
                if !path.exists() {
                    return Err(SailError::Config(ConfigError::NotFound {
                        path: path.display().to_string(),
                    }));
                }
                Self::from_file(&path)?
            }
            None => {
                let path = working_dir.join(CONFIG_FILE_NAME);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Self::default()
                }
            }
        };

        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&content).map_err(|e| {
            SailError::Config(ConfigError::Parsing {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })
    }

    fn apply_env(&mut self, env: &HashMap<String, String>) {
        let non_empty = |key: &str| env.get(key).filter(|v| !v.trim().is_empty()).cloned();

        if let Some(image) = non_empty(ENV_IMAGE) {
            debug!("Image overridden by {}", ENV_IMAGE);
            self.image = image;
        }
        if let Some(container) = non_empty(ENV_CONTAINER) {
            debug!("Container name overridden by {}", ENV_CONTAINER);
            self.container_name = container;
        }
        if let Some(env_file) = non_empty(ENV_ENV_FILE) {
            self.env_file = PathBuf::from(env_file);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.image.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "image must not be empty".to_string(),
            }
            .into());
        }
        if self.container_name.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "container_name must not be empty".to_string(),
            }
            .into());
        }
        if self.keepalive.is_empty() {
            return Err(ConfigError::Validation {
                message: "keepalive command must not be empty".to_string(),
            }
            .into());
        }
        if !self.workspace_target.starts_with('/') {
            return Err(ConfigError::Validation {
                message: format!(
                    "workspace_target must be an absolute container path, got '{}'",
                    self.workspace_target
                ),
            }
            .into());
        }
        Ok(())
    }

    /// The (image, container name) pair managed by this configuration
    pub fn identity(&self) -> ContainerIdentity {
        ContainerIdentity::new(&self.image, &self.container_name)
    }
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
