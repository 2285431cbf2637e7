//! End-to-end flow: mock gateway through the core verification service
//!
//! Exercises the same wiring a host application uses: the factory builds the
//! gateway from configuration and the service drives delivery, lookup by sid,
//! and verification over it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use smartsms_core::domain::entities::message::Message;
use smartsms_core::domain::value_objects::DeliverOptions;
use smartsms_core::domain::verifiable::Verifiable;
use smartsms_core::errors::DomainError;
use smartsms_core::repositories::{MessageRepository, RecordRepository};
use smartsms_core::verification::SmsVerification;
use smartsms_infra::sms::{create_sms_service, MockSmsService};
use smartsms_shared::config::{SmsConfig, VerificationConfig};

struct Customer {
    phone: String,
    verified_at: Option<DateTime<Utc>>,
}

impl Verifiable for Customer {
    fn phone(&self) -> &str {
        &self.phone
    }

    fn verified_at(&self) -> Option<DateTime<Utc>> {
        self.verified_at
    }

    fn set_verified_at(&mut self, at: Option<DateTime<Utc>>) {
        self.verified_at = at;
    }
}

#[derive(Default)]
struct MemoryMessages {
    by_phone: RwLock<HashMap<String, Vec<Message>>>,
}

#[async_trait]
impl MessageRepository for MemoryMessages {
    async fn create(&self, message: Message) -> Result<Message, DomainError> {
        self.by_phone
            .write()
            .await
            .entry(message.phone.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Message>, DomainError> {
        let mut list = self
            .by_phone
            .read()
            .await
            .get(phone)
            .cloned()
            .unwrap_or_default();
        list.sort_by_key(|m| m.sent_at);
        Ok(list)
    }

    async fn latest_by_phone(&self, phone: &str) -> Result<Option<Message>, DomainError> {
        Ok(self.find_by_phone(phone).await?.pop())
    }

    async fn count_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        Ok(self
            .by_phone
            .read()
            .await
            .get(phone)
            .map_or(0, |list| list.len() as u64))
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        Ok(self
            .by_phone
            .write()
            .await
            .remove(phone)
            .map_or(0, |list| list.len() as u64))
    }
}

#[derive(Default)]
struct MemoryCustomers {
    saves: RwLock<Vec<Option<DateTime<Utc>>>>,
}

#[async_trait]
impl RecordRepository for MemoryCustomers {
    type Record = Customer;

    async fn save(&self, record: &Customer) -> Result<(), DomainError> {
        self.saves.write().await.push(record.verified_at);
        Ok(())
    }
}

#[tokio::test]
async fn test_mock_gateway_drives_full_verification() {
    let gateway = Arc::new(MockSmsService::with_options(false, false));
    let messages = Arc::new(MemoryMessages::default());
    let customers = Arc::new(MemoryCustomers::default());
    let service = SmsVerification::new(
        gateway.clone(),
        messages,
        customers.clone(),
        VerificationConfig::default(),
    );

    let mut customer = Customer {
        phone: "13764071479".to_string(),
        verified_at: None,
    };

    let first = service
        .deliver(&customer, None, &DeliverOptions::default())
        .await
        .unwrap();
    let second = service
        .deliver(&customer, None, &DeliverOptions::default())
        .await
        .unwrap();

    assert_eq!(gateway.get_message_count(), 2);
    assert_eq!(service.message_count(&customer).await.unwrap(), 2);

    // the stored message carries the gateway's view of the send
    assert!(second.sid.as_deref().unwrap().starts_with("mock_"));
    assert_eq!(second.send_status.as_deref(), Some("SUCCESS"));

    // only the latest code verifies
    if first.code != second.code {
        assert!(!service.check(&customer, &first.code).await.unwrap());
    }
    assert!(service.check(&customer, &second.code).await.unwrap());
    assert_eq!(customers.saves.read().await.len(), 0);

    let verified_at = service.verify(&mut customer, &second.code).await.unwrap();
    assert!(verified_at.is_some());
    assert!(customer.is_verified());
    assert_eq!(customers.saves.read().await.as_slice(), &[verified_at]);
}

#[tokio::test]
async fn test_factory_built_gateway_plugs_into_service() {
    let gateway = Arc::new(create_sms_service(&SmsConfig::default()));
    let messages = Arc::new(MemoryMessages::default());
    let customers = Arc::new(MemoryCustomers::default());
    let service = SmsVerification::new(
        gateway,
        messages,
        customers,
        VerificationConfig::default(),
    );

    let mut customer = Customer {
        phone: "13764071479".to_string(),
        verified_at: None,
    };

    let message = service
        .deliver(&customer, Some("1234567890"), &DeliverOptions::default())
        .await
        .unwrap();

    assert_eq!(message.code, "1234567890");
    assert!(service
        .verify(&mut customer, "1234567890")
        .await
        .unwrap()
        .is_some());
}
