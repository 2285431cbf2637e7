//! SMS gateway configuration

use serde::{Deserialize, Serialize};
use std::env;

use super::environment::Environment;

/// Default base URL of the Yunpian REST API
pub const DEFAULT_BASE_URL: &str = "https://sms.yunpian.com/v1";

/// Gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsConfig {
    /// Gateway provider ("yunpian" or "mock")
    pub provider: String,
    /// API key used to authenticate against the gateway
    pub apikey: String,
    /// Base URL of the gateway REST API
    pub base_url: String,
    /// Maximum retry attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            apikey: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

impl SmsConfig {
    /// Load gateway settings from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env::var("SMARTSMS_PROVIDER").unwrap_or(defaults.provider),
            apikey: env::var("SMARTSMS_APIKEY").unwrap_or(defaults.apikey),
            base_url: env::var("SMARTSMS_BASE_URL").unwrap_or(defaults.base_url),
            max_retries: env::var("SMARTSMS_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: env::var("SMARTSMS_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_delay_ms),
            request_timeout_secs: env::var("SMARTSMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Default provider selection for an environment
    ///
    /// Development and staging fall back to the mock gateway so no real
    /// messages leave the machine.
    pub fn for_environment(env: Environment) -> Self {
        let provider = if env.is_production() {
            "yunpian".to_string()
        } else {
            "mock".to_string()
        };
        Self {
            provider,
            ..Self::from_env()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SmsConfig::default();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_for_environment_uses_mock_outside_production() {
        let config = SmsConfig::for_environment(Environment::Development);
        assert_eq!(config.provider, "mock");
    }

    #[test]
    fn test_for_environment_production_uses_yunpian() {
        let config = SmsConfig::for_environment(Environment::Production);
        assert_eq!(config.provider, "yunpian");
    }
}
