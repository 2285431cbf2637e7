//! MySQL implementation of the MessageRepository trait.
//!
//! Persists the delivery log in an `sms_messages` table:
//!
//! ```sql
//! CREATE TABLE sms_messages (
//!     id               CHAR(36)     NOT NULL PRIMARY KEY,
//!     phone            VARCHAR(32)  NOT NULL,
//!     code             VARCHAR(64)  NOT NULL,
//!     content          TEXT         NOT NULL,
//!     sid              VARCHAR(64)  NULL,
//!     send_status      VARCHAR(32)  NULL,
//!     report_status    VARCHAR(32)  NULL,
//!     fee              INT UNSIGNED NULL,
//!     sent_at          DATETIME(6)  NOT NULL,
//!     user_received_at DATETIME(6)  NULL,
//!     error_msg        TEXT         NULL,
//!     created_at       DATETIME(6)  NOT NULL,
//!     INDEX idx_sms_messages_phone_sent_at (phone, sent_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use smartsms_core::domain::entities::message::Message;
use smartsms_core::errors::DomainError;
use smartsms_core::repositories::MessageRepository;

/// MySQL implementation of MessageRepository
pub struct MySqlMessageRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlMessageRepository {
    /// Create a new MySQL message repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a Message entity
    fn row_to_message(row: &sqlx::mysql::MySqlRow) -> Result<Message, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(Message {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid message UUID: {}", e),
            })?,
            phone: row.try_get("phone").map_err(|e| DomainError::Internal {
                message: format!("Failed to get phone: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Internal {
                message: format!("Failed to get code: {}", e),
            })?,
            content: row.try_get("content").map_err(|e| DomainError::Internal {
                message: format!("Failed to get content: {}", e),
            })?,
            sid: row.try_get("sid").map_err(|e| DomainError::Internal {
                message: format!("Failed to get sid: {}", e),
            })?,
            send_status: row
                .try_get("send_status")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get send_status: {}", e),
                })?,
            report_status: row
                .try_get("report_status")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get report_status: {}", e),
                })?,
            fee: row.try_get("fee").map_err(|e| DomainError::Internal {
                message: format!("Failed to get fee: {}", e),
            })?,
            sent_at: row
                .try_get::<DateTime<Utc>, _>("sent_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get sent_at: {}", e),
                })?,
            user_received_at: row
                .try_get::<Option<DateTime<Utc>>, _>("user_received_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get user_received_at: {}", e),
                })?,
            error_msg: row.try_get("error_msg").map_err(|e| DomainError::Internal {
                message: format!("Failed to get error_msg: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl MessageRepository for MySqlMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, DomainError> {
        let query = r#"
            INSERT INTO sms_messages (
                id, phone, code, content, sid, send_status, report_status,
                fee, sent_at, user_received_at, error_msg, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(message.id.to_string())
            .bind(&message.phone)
            .bind(&message.code)
            .bind(&message.content)
            .bind(&message.sid)
            .bind(&message.send_status)
            .bind(&message.report_status)
            .bind(message.fee)
            .bind(message.sent_at)
            .bind(message.user_received_at)
            .bind(&message.error_msg)
            .bind(message.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to store message: {}", e),
            })?;

        Ok(message)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Vec<Message>, DomainError> {
        let query = r#"
            SELECT id, phone, code, content, sid, send_status, report_status,
                   fee, sent_at, user_received_at, error_msg, created_at
            FROM sms_messages
            WHERE phone = ?
            ORDER BY sent_at ASC, created_at ASC
        "#;

        let rows = sqlx::query(query)
            .bind(phone)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to list messages: {}", e),
            })?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn latest_by_phone(&self, phone: &str) -> Result<Option<Message>, DomainError> {
        let query = r#"
            SELECT id, phone, code, content, sid, send_status, report_status,
                   fee, sent_at, user_received_at, error_msg, created_at
            FROM sms_messages
            WHERE phone = ?
            ORDER BY sent_at DESC, created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to find latest message: {}", e),
            })?;

        row.as_ref().map(Self::row_to_message).transpose()
    }

    async fn count_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM sms_messages WHERE phone = ?")
            .bind(phone)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to count messages: {}", e),
            })?;

        let count: i64 = row.try_get("count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get count: {}", e),
        })?;
        Ok(count as u64)
    }

    async fn delete_by_phone(&self, phone: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM sms_messages WHERE phone = ?")
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage {
                message: format!("Failed to delete messages: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
