//! Configuration module
//!
//! Organized into logical areas:
//! - `environment` - Environment detection
//! - `sms` - SMS gateway connection settings
//! - `verification` - Code generation and validity policy

pub mod environment;
pub mod sms;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::Environment;
pub use sms::SmsConfig;
pub use verification::{
    CodeAlgorithm, VerificationConfig, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRES_IN_MINUTES,
};

/// Complete library configuration combining all sub-configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// SMS gateway configuration
    pub sms: SmsConfig,

    /// Verification policy
    pub verification: VerificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            sms: SmsConfig::default(),
            verification: VerificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// Reads a `.env` file when present, then individual variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self {
            environment,
            sms: SmsConfig::from_env(),
            verification: VerificationConfig::from_env(),
        }
    }
}
