//! Example demonstrating the full verification flow
//!
//! Wires the core `SmsVerification` service to the mock gateway and simple
//! in-memory stores, then walks a record through delivery and verification.
//!
//! Run with: cargo run --example verification_demo

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
use smartsms_infra::sms::create_sms_service;
use smartsms_shared::config::AppConfig;
use smartsms_shared::utils::phone::mask_phone;

struct User {
    phone: String,
    verified_at: Option<DateTime<Utc>>,
}

impl Verifiable for User {
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
struct MemoryUsers;

#[async_trait]
impl RecordRepository for MemoryUsers {
    type Record = User;

    async fn save(&self, record: &User) -> Result<(), DomainError> {
        println!(
            "  [store] persisted {} verified_at={:?}",
            mask_phone(&record.phone),
            record.verified_at
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    println!("Environment: {}", config.environment);
    println!("Provider: {}", config.sms.provider);

    let service = SmsVerification::new(
        Arc::new(create_sms_service(&config.sms)),
        Arc::new(MemoryMessages::default()),
        Arc::new(MemoryUsers::default()),
        config.verification,
    );

    let mut user = User {
        phone: "13764071479".to_string(),
        verified_at: None,
    };

    // a forgotten earlier code, then the one the user actually receives
    service.deliver_fake(&user, None).await?;
    let message = service.deliver(&user, None, &DeliverOptions::default()).await?;
    println!(
        "Delivered code {} (sid {:?}), {} messages on record",
        message.code,
        message.sid,
        service.message_count(&user).await?
    );

    let wrong = service.check(&user, "000000").await?;
    println!("check(\"000000\") -> {}", wrong);

    match service.verify(&mut user, &message.code).await? {
        Some(at) => println!("Verified at {}", at),
        None => println!("Verification failed"),
    }
    println!("Record verified: {}", user.is_verified());

    Ok(())
}
