//! Mock implementation of MessageRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::message::Message;
use crate::errors::DomainError;

use super::r#trait::MessageRepository;

/// In-memory message repository for tests
pub struct MockMessageRepository {
    messages: Arc<RwLock<HashMap<String, Vec<Message>>>>,
}

impl MockMessageRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockMessageRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, DomainError> {
        let mut messages = self.messages.write().await;
        messages
            .entry(message.phone.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let mut list = messages.get(phone).cloned().unwrap_or_default();
        // stable sort keeps insertion order for same-instant sends
        list.sort_by_key(|m| m.sent_at);
        Ok(list)
    }

    async fn latest_by_phone(&self, phone: &str) -> Result<Option<Message>, DomainError> {
        let mut list = self.find_by_phone(phone).await?;
        Ok(list.pop())
    }

    async fn count_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        let messages = self.messages.read().await;
        Ok(messages.get(phone).map_or(0, |list| list.len() as u64))
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        let mut messages = self.messages.write().await;
        Ok(messages.remove(phone).map_or(0, |list| list.len() as u64))
    }
}
