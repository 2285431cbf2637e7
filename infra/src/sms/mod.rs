//! SMS Gateway Module
//!
//! Implementations of the `SmsGateway` seam from `smartsms_core`:
//!
//! - **Yunpian**: production delivery over the Yunpian v1 REST API
//! - **Mock**: console output and an in-memory send log for development

pub mod mock_sms;
pub mod yunpian;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use yunpian::YunpianSmsService;

#[cfg(test)]
mod tests;

use smartsms_core::verification::SmsGateway;
use smartsms_shared::config::SmsConfig;

/// Create an SMS gateway based on configuration
///
/// Returns the implementation named by `config.provider`. An unknown
/// provider, or a Yunpian client that cannot be initialized, falls back to
/// the mock gateway with a warning.
pub fn create_sms_service(config: &SmsConfig) -> Box<dyn SmsGateway> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        "yunpian" => match YunpianSmsService::new(config.clone()) {
            Ok(service) => Box::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize Yunpian SMS gateway: {}", e);
                tracing::warn!("Falling back to mock SMS gateway");
                Box::new(MockSmsService::new())
            }
        },
        _ => {
            tracing::warn!(
                "Unknown SMS provider '{}', using mock implementation",
                config.provider
            );
            Box::new(MockSmsService::new())
        }
    }
}
