//! Installation of the process-wide `tracing` subscriber.
//!
//! Library code only emits events through the `tracing` macros; binaries and
//! tests call [`init_tracing`] once to decide where those events go.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Returns the format name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Builds the filter: `RUST_LOG` when set and valid, else `default_filter`.
fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs a global fmt subscriber.
///
/// Returns `true` if this call installed it and `false` if a global
/// subscriber was already set; repeated calls are harmless.
pub fn init_tracing(default_filter: &str, format: LogFormat) -> bool {
    let builder = fmt().with_env_filter(env_filter(default_filter)).with_target(true);

    let installed = match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().with_current_span(true).try_init().is_ok(),
    };
    if installed {
        tracing::debug!(format = format.as_str(), "tracing subscriber installed");
    }
    installed
}
