//! Mock implementation of RecordRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::verifiable::Verifiable;
use crate::errors::DomainError;

use super::r#trait::RecordRepository;

/// Mock record repository that remembers every save
///
/// Keeps a snapshot of the verified timestamp per save so tests can assert
/// whether, and with what value, persistence happened.
pub struct MockRecordRepository<R> {
    saved: Arc<RwLock<Vec<(String, Option<DateTime<Utc>>)>>>,
    _record: PhantomData<fn(R)>,
}

impl<R> MockRecordRepository<R> {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            saved: Arc::new(RwLock::new(Vec::new())),
            _record: PhantomData,
        }
    }

    /// How many times `save` was called
    pub async fn save_count(&self) -> usize {
        self.saved.read().await.len()
    }

    /// The verified timestamp carried by the most recent save, if any
    pub async fn last_saved_verified_at(&self) -> Option<Option<DateTime<Utc>>> {
        self.saved.read().await.last().map(|(_, at)| *at)
    }
}

impl<R> Default for MockRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Verifiable + Send + Sync> RecordRepository for MockRecordRepository<R> {
    type Record = R;

    async fn save(&self, record: &R) -> Result<(), DomainError> {
        self.saved
            .write()
            .await
            .push((record.phone().to_string(), record.verified_at()));
        Ok(())
    }
}
