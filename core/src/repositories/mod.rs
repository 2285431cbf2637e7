//! Repository interfaces for the persistence seams.

pub mod message;
pub mod record;

pub use message::MessageRepository;
pub use record::RecordRepository;

#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use record::MockRecordRepository;
