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

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Temperature {0} is outside [0, 1]")]
    InvalidTemperature(f32),

    #[error("Invalid generation backend base URL")]
    InvalidBaseUrl,

    #[error("Invalid {name} pattern: {reason}")]
    InvalidPattern { name: &'static str, reason: String },

    #[error("Keyword list {0} contains an empty entry")]
    EmptyKeyword(&'static str),

    #[error("Invalid font size")]
    InvalidFontSize,

    #[error("Margins leave no printable area")]
    InvalidMargins,

    #[error("Raw preview bound must be greater than zero")]
    InvalidPreviewBound,
}
