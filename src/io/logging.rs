//! Tracing subscriber setup.

use std::env;
use std::io;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::VrptwError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Installs a stderr subscriber.
///
/// `level` is an `EnvFilter` directive (`"info"`, `"u_vrptw=debug"`, `"off"`).
/// When `None`, `RUST_LOG` is used, falling back to `warn`. Returns `false`
/// if a global subscriber is already installed.
pub fn init_logging(level: Option<&str>, format: LogFormat) -> Result<bool, VrptwError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = level
        .map(str::to_string)
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "warn".to_string());
    let filter = if level.eq_ignore_ascii_case("off") {
        EnvFilter::default().add_directive(LevelFilter::OFF.into())
    } else {
        EnvFilter::try_new(&level)
            .map_err(|err| VrptwError::InvalidConfig(format!("invalid log filter: {err}")))?
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).json())
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).pretty())
            .try_init(),
    };
    installed
        .map_err(|err| VrptwError::InvalidConfig(format!("failed to initialize logging: {err}")))?;
    Ok(true)
}
