//! Tracing subscriber setup.
//!
//! The subscriber is installed before the configuration file is read, so that
//! config loading can log, and its level is swapped in afterwards.

use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

use crate::utils::error::{Error, Result};

/// Level used until the configuration is loaded
pub const BOOTSTRAP_LEVEL: &str = "info";

/// Handle to the installed filter.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogHandle {
    /// Switch to `level`. A filter taken from `RUST_LOG` is kept as is.
    pub fn set_level(&self, level: &str) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        self.filter
            .reload(EnvFilter::new(level))
            .map_err(|e| Error::ConfigError(format!("Failed to set log level '{}': {}", level, e)))
    }
}

/// Install the global subscriber, writing to stderr. `RUST_LOG` wins over
/// `level`. Returns `None` when a subscriber is already installed.
pub fn init_logging(level: &str) -> Option<LogHandle> {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        | Ok(filter) => (filter, true),
        | Err(_) => (EnvFilter::new(level), false),
    };
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok()?;
    Some(LogHandle { filter: handle, from_env })
}
