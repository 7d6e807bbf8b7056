//! Logging and observability
//!
//! Structured logging through `tracing-subscriber`, either human-readable text
//! or JSON, selected at runtime. All logging output is directed to stderr so
//! stdout stays reserved for command output and for the wrapped process.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system
///
/// Safe to call multiple times; only the first call installs a subscriber.
///
/// ## Arguments
///
/// * `format` - `Some("json")` for JSON lines, anything else (or `None`) for text.
///   When `None`, `SAIL_LOG_FORMAT` is consulted.
/// * `default_level` - filter used when neither `SAIL_LOG` nor `RUST_LOG` is set.
///
/// ## Environment Variables
///
/// * `SAIL_LOG_FORMAT` - `json` enables JSON output
/// * `SAIL_LOG` - filter directive, highest precedence
/// * `RUST_LOG` - standard fallback filter directive
pub fn init(format: Option<&str>, default_level: &str) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter(default_level);

        let env_format = std::env::var("SAIL_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .with_target(false)
                            .without_time()
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter from `SAIL_LOG`, then `RUST_LOG`, then the default level
fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(sail_log) = std::env::var("SAIL_LOG") {
        EnvFilter::try_new(&sail_log).unwrap_or_else(|_| {
            eprintln!(
                "Invalid SAIL_LOG specification '{}', using '{}'",
                sail_log, default_level
            );
            EnvFilter::new(default_level)
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    }
}

/// Check if logging has been initialized
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
