use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sail_core::config::SailConfig;
use sail_core::container::{ContainerIdentity, ContainerStatus};
use sail_core::docker::{CliRuntime, Docker, ExecConfig};
use sail_core::lifecycle::{
    BuildOptions, LifecycleController, StartOutcome, StopOutcome, Verb, VerbOutcome,
};
use std::path::PathBuf;
use tracing::debug;

/// Output format options
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured format
    Json,
}

/// Log format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

/// Log level options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Development container lifecycle controller
#[derive(Debug, Parser)]
#[command(name = "sail", version, arg_required_else_help = true)]
pub struct Cli {
    /// Log format (text or json, can be set via SAIL_LOG_FORMAT env var)
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Log level (SAIL_LOG or RUST_LOG take precedence)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Configuration file path (defaults to sail.toml in the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to docker executable
    #[arg(long, global = true, default_value = "docker")]
    pub docker_path: String,

    /// Never allocate a pseudo-terminal for exec-style commands
    #[arg(long, global = true)]
    pub no_tty: bool,

    /// Verb to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Controller verbs
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the development image
    Build {
        /// Do not use cache when building the image
        #[arg(long)]
        no_cache: bool,

        /// Always attempt to pull newer base images
        #[arg(long)]
        pull: bool,
    },
    /// Create and start the container (no-op when already running)
    Start,
    /// Stop the container (no-op when not running)
    Stop,
    /// Stop, then start a fresh container
    Restart,
    /// Print the container state (absent, stopped, running)
    Status {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run a command in the running container
    Exec {
        /// Command and arguments
        #[arg(
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true,
            value_name = "COMMAND"
        )]
        command: Vec<String>,
    },
    /// Open an interactive bash session in the running container
    Shell,
    /// Print container logs (options pass through to docker logs)
    Logs {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "OPTIONS")]
        args: Vec<String>,
    },
    /// Run python in the running container
    Python {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
    /// Run pip in the running container
    Pip {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        args: Vec<String>,
    },
}

impl From<Commands> for Verb {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Build { no_cache, pull } => Verb::Build(BuildOptions { no_cache, pull }),
            Commands::Start => Verb::Start,
            Commands::Stop => Verb::Stop,
            Commands::Restart => Verb::Restart,
            Commands::Status { .. } => Verb::Status,
            Commands::Exec { command } => Verb::Exec(command),
            Commands::Shell => Verb::Shell,
            Commands::Logs { args } => Verb::Logs(args),
            Commands::Python { args } => Verb::Python(args),
            Commands::Pip { args } => Verb::Pip(args),
        }
    }
}

impl Cli {
    /// Run the selected verb and return the process exit code
    ///
    /// Exec-style verbs return the exit code of the command run inside the
    /// container; every other verb returns `0` on success.
    pub async fn dispatch(self) -> Result<i32> {
        let log_format = self.log_format.map(|format| match format {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        });
        sail_core::logging::init(log_format, self.log_level.as_filter())?;
        debug!("CLI initialized with log level: {:?}", self.log_level);

        let working_dir = std::env::current_dir()?;
        let config = SailConfig::load(&working_dir, self.config.as_deref())?;
        debug!(
            "Managing container {} from image {}",
            config.container_name, config.image
        );

        let runtime = CliRuntime::with_runtime_path(self.docker_path.clone());
        runtime.check_runtime_installed()?;
        runtime.ping().await?;

        let controller = LifecycleController::new(runtime, config, working_dir)
            .with_exec_config(ExecConfig::detect(self.no_tty));
        let identity = controller.identity();
        let format = match self.command {
            Commands::Status { format } => format,
            _ => OutputFormat::Text,
        };

        let outcome = controller.run(self.command.into()).await?;
        report(&identity, format, outcome)
    }
}

/// Print the user-facing result of a verb and return its exit code
fn report(identity: &ContainerIdentity, format: OutputFormat, outcome: VerbOutcome) -> Result<i32> {
    let container = identity.container_name.as_str();
    match outcome {
        VerbOutcome::Built => println!("Built image {}", identity.image),
        VerbOutcome::Started(start) => report_start(container, &start),
        VerbOutcome::Stopped(stop) => report_stop(container, stop),
        VerbOutcome::Restarted { stop, start } => {
            report_stop(container, stop);
            report_start(container, &start);
        }
        VerbOutcome::Status(state) => match format {
            OutputFormat::Text => println!("{}", state),
            OutputFormat::Json => {
                let status = ContainerStatus {
                    identity: identity.clone(),
                    state,
                };
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
        },
        VerbOutcome::Exited(code) => return Ok(code),
    }
    Ok(0)
}

fn report_start(container: &str, outcome: &StartOutcome) {
    match outcome {
        StartOutcome::AlreadyRunning => println!("Container {} is already running", container),
        StartOutcome::Started { built_image, .. } => {
            if *built_image {
                println!("Built missing image");
            }
            println!("Started container {}", container);
        }
    }
}

fn report_stop(container: &str, outcome: StopOutcome) {
    match outcome {
        StopOutcome::Stopped => println!("Stopped container {}", container),
        StopOutcome::NotRunning(state) => {
            println!("Container {} is not running ({})", container, state)
        }
    }
}
