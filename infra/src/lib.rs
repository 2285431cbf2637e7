//! # Infrastructure Layer
//!
//! Concrete implementations behind the seams `smartsms_core` defines:
//!
//! - **SMS**: the Yunpian gateway client and a mock gateway for development
//! - **Database**: MySQL-backed delivery log using SQLx
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL delivery log (default)

// Re-export core types for convenience
pub use smartsms_core::errors::*;

/// Database module - MySQL delivery log using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS gateway module - External providers and the mock gateway
pub mod sms;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
