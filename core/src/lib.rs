//! # SmartSMS Core
//!
//! Domain layer for SMS-based verification of persisted records. This crate
//! contains the delivery-attempt entity, the record abstraction the behavior
//! attaches to, repository interfaces, the verification service, and error
//! types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod verification;

// Re-export commonly used types for convenience
pub use domain::{DeliverOptions, DeliveryReceipt, Message, SmsDetail, Verifiable};
pub use errors::{DomainError, DomainResult, GatewayError};
pub use repositories::{MessageRepository, RecordRepository};
pub use verification::{SmsGateway, SmsVerification};
