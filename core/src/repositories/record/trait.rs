//! Record repository trait for persisting verified state.

use async_trait::async_trait;

use crate::domain::verifiable::Verifiable;
use crate::errors::DomainError;

/// Persists the host record after its verified state changes
///
/// The record type is defined by the host application, so the contract uses
/// an associated type rather than a fixed entity. Implementations write the
/// record back to whatever stores it; the verification service calls `save`
/// exactly once per successful strict verification.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// The record type this repository persists
    type Record: Verifiable + Send + Sync;

    /// Write the record's current state to the backing store
    async fn save(&self, record: &Self::Record) -> Result<(), DomainError>;
}
