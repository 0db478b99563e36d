use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::CacheError;

/// Installs the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level. Fails when a global
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CacheError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| CacheError::configuration(format!("Invalid log level: {}", e)))?;

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    result.map_err(|e| CacheError::configuration(format!("Logging already initialized: {}", e)))?;

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}
