//! Message repository trait defining the interface for the delivery log.
//!
//! The log is the source of truth for verification: the latest entry for a
//! phone number carries the only code that can currently verify. The trait
//! is async-first and uses Result types for proper error handling.

use async_trait::async_trait;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

/// Repository contract for the ordered log of delivery attempts
///
/// Messages are keyed by the recipient phone number. Ordering is by send
/// time, oldest first; ties resolve by insertion order.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a delivery attempt to the log
    ///
    /// # Returns
    /// * `Ok(Message)` - The stored message
    /// * `Err(DomainError)` - Storage failed
    async fn create(&self, message: Message) -> Result<Message, DomainError>;

    /// All delivery attempts for a phone number, oldest first
    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Message>, DomainError>;

    /// The most recent delivery attempt for a phone number
    ///
    /// # Returns
    /// * `Ok(Some(Message))` - The latest delivery
    /// * `Ok(None)` - Nothing has been delivered to this number
    /// * `Err(DomainError)` - Storage failed
    async fn latest_by_phone(&self, phone: &str) -> Result<Option<Message>, DomainError>;

    /// Number of delivery attempts recorded for a phone number
    async fn count_by_phone(&self, phone: &str) -> Result<u64, DomainError>;

    /// Drop all delivery attempts for a phone number
    ///
    /// # Returns
    /// * `Ok(count)` - How many messages were removed
    /// * `Err(DomainError)` - Storage failed
    async fn delete_by_phone(&self, phone: &str) -> Result<u64, DomainError>;
}
