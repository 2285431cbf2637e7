//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use smartsms_shared::config::VerificationConfig;
use smartsms_shared::utils::phone::mask_phone;

use crate::domain::entities::message::Message;
use crate::domain::value_objects::DeliverOptions;
use crate::domain::verifiable::Verifiable;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{MessageRepository, RecordRepository};

use super::code;
use super::traits::SmsGateway;

/// Verification workflow over a gateway, a delivery log, and record persistence
///
/// A submitted code is accepted when it equals the code carried by the most
/// recent delivery for the record's phone number and that delivery is still
/// inside the configured validity window. `verify` stamps and persists the
/// verified timestamp on success; `check` reports the same comparison without
/// touching any state.
pub struct SmsVerification<G, M, P>
where
    G: SmsGateway,
    M: MessageRepository,
    P: RecordRepository,
{
    /// SMS gateway used for real deliveries
    gateway: Arc<G>,
    /// Ordered log of delivery attempts
    messages: Arc<M>,
    /// Persistence for the host record
    records: Arc<P>,
    /// Verification policy
    config: VerificationConfig,
}

impl<G, M, P> SmsVerification<G, M, P>
where
    G: SmsGateway,
    M: MessageRepository,
    P: RecordRepository,
{
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `gateway` - SMS gateway implementation
    /// * `messages` - Delivery log implementation
    /// * `records` - Record persistence implementation
    /// * `config` - Verification policy
    pub fn new(gateway: Arc<G>, messages: Arc<M>, records: Arc<P>, config: VerificationConfig) -> Self {
        Self {
            gateway,
            messages,
            records,
            config,
        }
    }

    /// Deliver a verification message to the record's phone number
    ///
    /// Generates a code per the configured algorithm unless explicit content
    /// is supplied, in which case the content itself becomes the code of
    /// record. One message is appended to the log per acknowledged send; a
    /// gateway failure records nothing. After the gateway accepts the send,
    /// the delivery detail is read back by sid and merged into the stored
    /// message when available.
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - The recorded delivery attempt
    /// * `Err(DomainError)` - Invalid phone, gateway failure, or storage failure
    pub async fn deliver(
        &self,
        record: &P::Record,
        content: Option<&str>,
        options: &DeliverOptions,
    ) -> DomainResult<Message> {
        let phone = record.phone();
        if !self.gateway.is_valid_phone(phone) {
            return Err(DomainError::Validation {
                message: format!("Invalid phone number: {}", mask_phone(phone)),
            });
        }

        let code = match content {
            Some(text) => text.to_string(),
            None => code::generate(self.config.algorithm, self.config.code_length),
        };

        let receipt = self
            .gateway
            .deliver(phone, &code, options)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone(phone),
                    error = %e,
                    event = "sms_delivery_failed",
                    "Gateway did not accept delivery"
                );
                DomainError::from(e)
            })?;

        tracing::info!(
            phone = %mask_phone(phone),
            sid = %receipt.sid,
            event = "sms_delivered",
            "Verification message accepted by gateway"
        );

        let mut message = Message::local(phone, code).with_sid(receipt.sid.clone());
        message.fee = Some(receipt.fee);

        // Enrich from the gateway's view of the send when available
        match self.gateway.find_by_sid(&receipt.sid).await {
            Ok(Some(detail)) => message.apply_detail(&detail),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    sid = %receipt.sid,
                    error = %e,
                    "Could not fetch delivery detail, keeping local view"
                );
            }
        }

        if !self.config.store_messages {
            return Ok(message);
        }

        self.messages.create(message).await.map_err(|e| {
            tracing::error!(
                phone = %mask_phone(phone),
                error = %e,
                event = "message_store_failed",
                "Failed to record delivery attempt"
            );
            e
        })
    }

    /// Record a fabricated delivery without touching the gateway
    ///
    /// Mirrors a real delivery in the log so downstream verification can be
    /// exercised in development and tests. A code is generated per the
    /// configured algorithm when none is supplied.
    pub async fn deliver_fake(&self, record: &P::Record, code: Option<String>) -> DomainResult<Message> {
        let code =
            code.unwrap_or_else(|| code::generate(self.config.algorithm, self.config.code_length));
        let message = Message::local(record.phone(), code);

        tracing::debug!(
            phone = %mask_phone(record.phone()),
            event = "sms_fabricated",
            "Recorded fabricated delivery"
        );

        self.messages.create(message).await
    }

    /// Strict verification: persist the verified timestamp on success
    ///
    /// Returns `Ok(Some(timestamp))` when the submitted code matches the
    /// latest delivery, after the record has been stamped and saved. Any
    /// non-match (wrong code, no deliveries, or latest delivery outside the
    /// validity window) returns `Ok(None)` and leaves persisted state
    /// untouched.
    pub async fn verify(
        &self,
        record: &mut P::Record,
        submitted: &str,
    ) -> DomainResult<Option<DateTime<Utc>>> {
        if !self.code_matches_latest(record.phone(), submitted).await? {
            tracing::warn!(
                phone = %mask_phone(record.phone()),
                event = "verification_failed",
                "Submitted code did not match the latest delivery"
            );
            return Ok(None);
        }

        let now = Utc::now();
        record.set_verified_at(Some(now));
        self.records.save(record).await?;

        tracing::info!(
            phone = %mask_phone(record.phone()),
            event = "verification_succeeded",
            "Record verified and persisted"
        );
        Ok(Some(now))
    }

    /// Non-persisting check: report whether the code would verify
    ///
    /// Applies exactly the matching rule of [`SmsVerification::verify`] but
    /// never mutates the record or calls the record repository.
    pub async fn check(&self, record: &P::Record, submitted: &str) -> DomainResult<bool> {
        self.code_matches_latest(record.phone(), submitted).await
    }

    /// The most recent delivery attempt for the record
    pub async fn latest_message(&self, record: &P::Record) -> DomainResult<Option<Message>> {
        self.messages.latest_by_phone(record.phone()).await
    }

    /// All delivery attempts for the record, oldest first
    pub async fn messages(&self, record: &P::Record) -> DomainResult<Vec<Message>> {
        self.messages.find_by_phone(record.phone()).await
    }

    /// Number of delivery attempts recorded for the record
    pub async fn message_count(&self, record: &P::Record) -> DomainResult<u64> {
        self.messages.count_by_phone(record.phone()).await
    }

    /// Drop the delivery log for the record's phone number
    pub async fn clear_messages(&self, record: &P::Record) -> DomainResult<u64> {
        tracing::info!(
            phone = %mask_phone(record.phone()),
            event = "messages_cleared",
            "Clearing delivery log"
        );
        self.messages.delete_by_phone(record.phone()).await
    }

    /// The matching rule: submitted equals the latest delivery's code and
    /// that delivery is still inside the validity window
    async fn code_matches_latest(&self, phone: &str, submitted: &str) -> DomainResult<bool> {
        if submitted.is_empty() {
            return Ok(false);
        }

        let latest = self.messages.latest_by_phone(phone).await?;
        Ok(match latest {
            Some(message) => {
                message.matches(submitted) && !message.is_expired(self.config.expires_in())
            }
            None => false,
        })
    }
}
