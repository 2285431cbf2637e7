//! Gateway-facing value objects: delivery options, acknowledgements, and
//! the per-message detail the gateway reports back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Options forwarded to the gateway on delivery
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverOptions {
    /// Gateway template id; template delivery is used when present
    pub template_id: Option<i64>,

    /// Additional provider parameters passed through verbatim
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl DeliverOptions {
    /// Options for a template-based delivery
    pub fn with_template(template_id: i64) -> Self {
        Self {
            template_id: Some(template_id),
            params: HashMap::new(),
        }
    }

    /// Add a pass-through provider parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Gateway acknowledgement for an accepted send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Gateway-assigned message id
    pub sid: String,
    /// Number of SMS segments billed
    pub count: u32,
    /// Billing units charged
    pub fee: u32,
}

/// Delivery detail reported by the gateway for a sent message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsDetail {
    /// Gateway-assigned message id
    pub sid: String,
    /// Recipient phone number as the gateway saw it
    pub mobile: String,
    /// Message body as sent
    pub text: String,
    /// Gateway send status
    pub send_status: Option<String>,
    /// Delivery report status
    pub report_status: Option<String>,
    /// Billing units charged
    pub fee: Option<u32>,
    /// When the gateway accepted the message
    pub send_time: Option<DateTime<Utc>>,
    /// When the handset acknowledged receipt
    pub user_receive_time: Option<DateTime<Utc>>,
    /// Gateway error detail, if any
    pub error_msg: Option<String>,
}
