//! Shared configuration and utilities for the SmartSMS workspace
//!
//! This crate provides the pieces used by both the domain and the
//! infrastructure layers:
//! - Configuration types loaded from the environment
//! - Shared error types
//! - Phone number utilities (validation, masking)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CodeAlgorithm, Environment, SmsConfig, VerificationConfig};
pub use errors::ConfigError;
pub use utils::phone;
