use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::DomainError;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured level. Fails if a subscriber is already installed, which in
/// an embedding application is the host's to own.
pub fn init_logging(config: &LoggingConfig) -> Result<(), DomainError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    }
    .map_err(|e| DomainError::configuration(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}
