//! Verification policy configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::ConfigError;

/// Default validity window for a delivered code, in minutes
pub const DEFAULT_EXPIRES_IN_MINUTES: i64 = 60;

/// Default length of generated verification codes
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Algorithm used to generate verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeAlgorithm {
    /// Digits only
    Simple,
    /// Mixed-case letters and digits
    Random,
}

impl Default for CodeAlgorithm {
    fn default() -> Self {
        CodeAlgorithm::Simple
    }
}

impl std::str::FromStr for CodeAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(CodeAlgorithm::Simple),
            "random" => Ok(CodeAlgorithm::Random),
            _ => Err(ConfigError::Invalid {
                key: "code_algorithm".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Policy for generating and accepting verification codes
///
/// The validity window applies to the latest delivered message: a submitted
/// code is accepted only while that delivery is younger than `expires_in_minutes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Minutes before the latest delivered code stops being accepted
    pub expires_in_minutes: i64,
    /// Length of generated codes
    pub code_length: usize,
    /// Code generation algorithm
    pub algorithm: CodeAlgorithm,
    /// Whether delivered messages are recorded in the local store
    pub store_messages: bool,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            expires_in_minutes: DEFAULT_EXPIRES_IN_MINUTES,
            code_length: DEFAULT_CODE_LENGTH,
            algorithm: CodeAlgorithm::default(),
            store_messages: true,
        }
    }
}

impl VerificationConfig {
    /// Load the verification policy from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            expires_in_minutes: env::var("SMARTSMS_EXPIRES_IN_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.expires_in_minutes),
            code_length: env::var("SMARTSMS_CODE_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.code_length),
            algorithm: env::var("SMARTSMS_CODE_ALGORITHM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.algorithm),
            store_messages: env::var("SMARTSMS_STORE_MESSAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.store_messages),
        }
    }

    /// Validity window as a chrono duration
    pub fn expires_in(&self) -> Duration {
        Duration::minutes(self.expires_in_minutes)
    }
}
