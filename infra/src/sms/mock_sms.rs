//! Mock SMS Gateway Implementation
//!
//! A mock implementation of the gateway seam for development and testing.
//! Messages are logged instead of sent; every accepted send is remembered so
//! `find_by_sid` round-trips the way the real gateway does.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use smartsms_core::domain::value_objects::{DeliverOptions, DeliveryReceipt, SmsDetail};
use smartsms_core::errors::GatewayError;
use smartsms_core::verification::SmsGateway;
use smartsms_shared::utils::phone::{is_valid_phone, mask_phone};

/// Mock SMS gateway for development and testing
///
/// This implementation:
/// - Logs messages instead of delivering them
/// - Validates phone numbers
/// - Fabricates `mock_<uuid>` sids and remembers each send
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Delivery detail per fabricated sid
    sent: Arc<Mutex<HashMap<String, SmsDetail>>>,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockSmsService {
    /// Create a new mock gateway
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock gateway with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter and forget remembered sends
    pub fn reset(&self) {
        self.message_count.store(0, Ordering::SeqCst);
        self.sent.lock().unwrap().clear();
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsGateway for MockSmsService {
    async fn deliver(
        &self,
        phone: &str,
        content: &str,
        _options: &DeliverOptions,
    ) -> Result<DeliveryReceipt, GatewayError> {
        if !is_valid_phone(phone) {
            return Err(GatewayError::Rejected {
                message: format!("Invalid phone number: {}", mask_phone(phone)),
            });
        }

        if self.simulate_failure {
            warn!(
                "Mock gateway simulating failure for phone: {}",
                mask_phone(phone)
            );
            return Err(GatewayError::Transport {
                message: "Simulated SMS sending failure".to_string(),
            });
        }

        let sid = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        self.sent.lock().unwrap().insert(
            sid.clone(),
            SmsDetail {
                sid: sid.clone(),
                mobile: phone.to_string(),
                text: content.to_string(),
                send_status: Some("SUCCESS".to_string()),
                report_status: Some("SUCCESS".to_string()),
                fee: Some(1),
                send_time: Some(Utc::now()),
                user_receive_time: None,
                error_msg: None,
            },
        );

        let masked_phone = mask_phone(phone);

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS GATEWAY - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", phone, masked_phone);
            println!("Sid: {}", sid);
            println!("Content: {}", content);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "sms_gateway",
            provider = "mock",
            phone = %masked_phone,
            sid = %sid,
            content_length = content.len(),
            "SMS sent successfully (mock)"
        );

        Ok(DeliveryReceipt { sid, count: 1, fee: 1 })
    }

    async fn find_by_sid(&self, sid: &str) -> Result<Option<SmsDetail>, GatewayError> {
        Ok(self.sent.lock().unwrap().get(sid).cloned())
    }

    fn is_valid_phone(&self, phone: &str) -> bool {
        is_valid_phone(phone)
    }
}
