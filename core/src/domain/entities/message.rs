//! Delivery attempt entity for SMS-based verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::SmsDetail;

/// A single SMS delivery attempt
///
/// One `Message` is recorded per send, whether the send went through a real
/// gateway or was fabricated locally. The most recent message for a phone
/// number carries the only code that can currently verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the delivery attempt
    pub id: Uuid,

    /// Phone number the message was sent to
    pub phone: String,

    /// Verification code carried by this message
    pub code: String,

    /// Full SMS body
    pub content: String,

    /// Gateway-assigned message id; `None` for local fabrications
    pub sid: Option<String>,

    /// Gateway send status
    pub send_status: Option<String>,

    /// Delivery report status
    pub report_status: Option<String>,

    /// Billing units charged by the gateway
    pub fee: Option<u32>,

    /// When the message was sent
    pub sent_at: DateTime<Utc>,

    /// When the handset acknowledged receipt
    pub user_received_at: Option<DateTime<Utc>>,

    /// Gateway error detail, if any
    pub error_msg: Option<String>,

    /// When the record was created locally
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a delivery attempt carrying `code` as its body
    ///
    /// Used for fabricated deliveries and as the starting point for real
    /// sends before the gateway detail arrives.
    pub fn local(phone: impl Into<String>, code: impl Into<String>) -> Self {
        let code = code.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone: phone.into(),
            content: code.clone(),
            code,
            sid: None,
            send_status: None,
            report_status: None,
            fee: None,
            sent_at: now,
            user_received_at: None,
            error_msg: None,
            created_at: now,
        }
    }

    /// Attaches the gateway-assigned message id
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Merges the gateway's view of the send into this record
    ///
    /// The carried code is never overwritten; everything the gateway reports
    /// about the physical delivery is.
    pub fn apply_detail(&mut self, detail: &SmsDetail) {
        self.sid = Some(detail.sid.clone());
        self.content = detail.text.clone();
        self.send_status = detail.send_status.clone();
        self.report_status = detail.report_status.clone();
        if detail.fee.is_some() {
            self.fee = detail.fee;
        }
        if let Some(send_time) = detail.send_time {
            self.sent_at = send_time;
        }
        self.user_received_at = detail.user_receive_time;
        self.error_msg = detail.error_msg.clone();
    }

    /// Whether this delivery is older than the validity window
    pub fn is_expired(&self, window: Duration) -> bool {
        Utc::now() - self.sent_at > window
    }

    /// Constant-time comparison of the carried code with a submitted one
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }
}
