use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::errors::{AdvisorError, AdvisorResult};

/// Install the global tracing subscriber. RUST_LOG wins over the configured level.
pub fn init_logging(config: &LoggingConfig) -> AdvisorResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| AdvisorError::logging(format!("invalid level '{}': {e}", config.level)))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(config.ansi))
        .with(filter)
        .try_init()
        .map_err(|e| AdvisorError::logging(format!("Failed to initialize logger: {e}")))?;

    Ok(())
}
