//! Shared error types

use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: String, value: String },
}
