//! Gateway seam for SMS delivery

use async_trait::async_trait;

use crate::domain::value_objects::{DeliverOptions, DeliveryReceipt, SmsDetail};
use crate::errors::GatewayError;

/// Trait for SMS gateway integration
///
/// Implementations live in the infrastructure layer: the Yunpian HTTP client
/// for production and a mock gateway for development and tests.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver a message, returning the gateway acknowledgement
    async fn deliver(
        &self,
        phone: &str,
        content: &str,
        options: &DeliverOptions,
    ) -> Result<DeliveryReceipt, GatewayError>;

    /// Look up the delivery detail for a previously accepted send
    async fn find_by_sid(&self, sid: &str) -> Result<Option<SmsDetail>, GatewayError>;

    /// Check if the phone number format is deliverable
    fn is_valid_phone(&self, phone: &str) -> bool;
}

// Boxed gateways (e.g. from a provider factory) delegate to the inner value
#[async_trait]
impl<T: SmsGateway + ?Sized> SmsGateway for Box<T> {
    async fn deliver(
        &self,
        phone: &str,
        content: &str,
        options: &DeliverOptions,
    ) -> Result<DeliveryReceipt, GatewayError> {
        (**self).deliver(phone, content, options).await
    }

    async fn find_by_sid(&self, sid: &str) -> Result<Option<SmsDetail>, GatewayError> {
        (**self).find_by_sid(sid).await
    }

    fn is_valid_phone(&self, phone: &str) -> bool {
        (**self).is_valid_phone(phone)
    }
}
