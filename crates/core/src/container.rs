//! Container identity and state
//!
//! A deployment manages a single (image, container name) pair. The container's
//! state is never cached: callers query the runtime each time and map the
//! reported status onto [`ContainerState`].

use serde::{Deserialize, Serialize};

/// The fixed image/container pair managed by `sail`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerIdentity {
    /// Image tag
    pub image: String,
    /// Container name (Docker enforces uniqueness)
    pub container_name: String,
}

impl ContainerIdentity {
    pub fn new(image: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            container_name: container_name.into(),
        }
    }
}

/// Observed container state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    /// No container with the managed name exists
    Absent,
    /// A container exists but is not running
    Stopped,
    /// The container is running
    Running,
}

impl ContainerState {
    /// Map a Docker `State.Status` value onto a container state
    ///
    /// Only `running` counts as running. Every other status of an existing
    /// container (`created`, `exited`, `paused`, `restarting`, `dead`) is
    /// treated as stopped, since none of them accept `exec`.
    pub fn from_docker_status(status: &str) -> Self {
        match status.trim() {
            "running" => ContainerState::Running,
            _ => ContainerState::Stopped,
        }
    }

    pub fn is_running(self) -> bool {
        self == ContainerState::Running
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerState::Absent => "absent",
            ContainerState::Stopped => "stopped",
            ContainerState::Running => "running",
        }
    }
}

impl std::fmt::Display for ContainerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable `sail status` report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStatus {
    #[serde(flatten)]
    pub identity: ContainerIdentity,
    pub state: ContainerState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_docker_status() {
        assert_eq!(
            ContainerState::from_docker_status("running\n"),
            ContainerState::Running
        );
        for status in ["created", "exited", "paused", "restarting", "dead"] {
            assert_eq!(
                ContainerState::from_docker_status(status),
                ContainerState::Stopped,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(ContainerState::Absent.to_string(), "absent");
        assert_eq!(
            serde_json::to_string(&ContainerState::Running).unwrap(),
            "\"running\""
        );
    }

    #[test]
    fn test_status_json_shape() {
        let status = ContainerStatus {
            identity: ContainerIdentity::new("sail-dev:latest", "sail-dev"),
            state: ContainerState::Stopped,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "image": "sail-dev:latest",
                "container_name": "sail-dev",
                "state": "stopped"
            })
        );
    }
}
