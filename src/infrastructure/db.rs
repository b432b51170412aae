//! PostgreSQL connection pool setup and legacy column codecs

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Build a connection pool from the database configuration
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Boolean flags are stored in CHAR(1) columns holding Y or N
pub(crate) fn bool_to_yn(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// Decode a CHAR(1) Y/N flag; CHAR padding is tolerated
pub(crate) fn yn_to_bool(value: &str) -> Result<bool, DomainError> {
    match value.trim_end() {
        "Y" => Ok(true),
        "N" => Ok(false),
        other => Err(DomainError::storage(format!(
            "Invalid Y/N flag value in database: '{}'",
            other
        ))),
    }
}

/// Narrow an i64 to an INT column value. The legacy schema stores several
/// counters and keys as INT, so values outside the i32 range cannot be
/// persisted and must not wrap silently.
pub(crate) fn to_int_column(value: i64, what: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::validation(format!("{} {} does not fit the INT column", what, value))
    })
}

/// Classify a store error the way the legacy schema surfaces it: unique
/// violations become conflicts, everything else is a storage error.
pub(crate) fn map_sqlx_error(context: &str, error: sqlx::Error) -> DomainError {
    let message = error.to_string();
    if message.contains("duplicate key") || message.contains("unique constraint") {
        DomainError::conflict(format!("{}: {}", context, message))
    } else {
        DomainError::storage(format!("{}: {}", context, message))
    }
}
