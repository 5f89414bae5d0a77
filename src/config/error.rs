//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (64)")]
    PoolSizeTooLarge,

    #[error("Scheduler weeks_ahead must be between 1 and 26")]
    InvalidWeeksAhead,

    #[error("Scheduler max_window_days must be between 1 and 366")]
    InvalidMaxWindowDays,

    #[error("Scheduler weeks_ahead horizon exceeds max_window_days")]
    HorizonExceedsWindowCap,

    #[error("Trigger secret must be at least 32 characters in production")]
    TriggerSecretTooShort,
}
