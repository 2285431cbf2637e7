//! Record abstraction for entities that carry phone verification.

use chrono::{DateTime, Utc};

/// A persisted record that can be verified by phone
///
/// The verification workflow attaches to anything implementing this trait.
/// Implementors map `verified_at` onto whatever field actually stores the
/// timestamp; a record whose storage column is named `confirmed_at` reports
/// the same value through both names.
pub trait Verifiable {
    /// Phone number that receives verification messages
    fn phone(&self) -> &str;

    /// When the record was verified, if ever
    fn verified_at(&self) -> Option<DateTime<Utc>>;

    /// Set or clear the verified timestamp
    fn set_verified_at(&mut self, at: Option<DateTime<Utc>>);

    /// Whether the record has been verified
    fn is_verified(&self) -> bool {
        self.verified_at().is_some()
    }
}
