//! Yunpian SMS Gateway Client
//!
//! Speaks the Yunpian v1 REST API: form-encoded requests authenticated by
//! apikey, JSON envelope where `code == 0` means success. Template sends go
//! through `sms/tpl_send.json`, plain sends through `sms/send.json`, and
//! per-message detail comes back from `sms/get.json`.
//!
//! ## Features
//!
//! - Automatic retry with exponential backoff on 429 and server errors
//! - Request timeout
//! - Tolerant envelope parsing (the gateway mixes numbers and strings)
//! - Security: phone number masking in logs

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use smartsms_core::domain::value_objects::{DeliverOptions, DeliveryReceipt, SmsDetail};
use smartsms_core::errors::GatewayError;
use smartsms_core::verification::SmsGateway;
use smartsms_shared::config::SmsConfig;
use smartsms_shared::utils::phone::{is_valid_phone, mask_phone};

use crate::InfrastructureError;

/// Yunpian gateway client
pub struct YunpianSmsService {
    client: Client,
    config: SmsConfig,
}

impl YunpianSmsService {
    /// Create a new client from gateway settings
    pub fn new(config: SmsConfig) -> Result<Self, InfrastructureError> {
        if config.apikey.is_empty() {
            return Err(InfrastructureError::Config(
                "SMARTSMS_APIKEY not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!("Yunpian SMS gateway initialized against {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmsConfig::from_env())
    }

    /// POST a form to an API endpoint, retrying transient failures
    async fn post_with_retry(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<String, GatewayError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;
            debug!(
                "Gateway request attempt {}/{} to {}",
                attempts, self.config.max_retries, path
            );

            match self.client.post(&url).form(form).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(|e| GatewayError::Transport {
                            message: e.to_string(),
                        });
                    }
                    if status.as_u16() == 429 || status.is_server_error() {
                        warn!("Gateway returned {}, backing off for {:?}", status, delay);
                    } else {
                        // client errors are not retryable
                        return Err(GatewayError::Rejected {
                            message: format!("HTTP {}", status),
                        });
                    }
                }
                Err(e) => {
                    error!(
                        "Gateway request failed (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );
                    if attempts >= self.config.max_retries {
                        return Err(GatewayError::Transport {
                            message: e.to_string(),
                        });
                    }
                }
            }

            if attempts >= self.config.max_retries {
                return Err(GatewayError::Transport {
                    message: format!("gave up after {} attempts", attempts),
                });
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl SmsGateway for YunpianSmsService {
    async fn deliver(
        &self,
        phone: &str,
        content: &str,
        options: &DeliverOptions,
    ) -> Result<DeliveryReceipt, GatewayError> {
        let (path, form) = match options.template_id {
            Some(template_id) => (
                "sms/tpl_send.json",
                vec![
                    ("apikey".to_string(), self.config.apikey.clone()),
                    ("mobile".to_string(), phone.to_string()),
                    ("tpl_id".to_string(), template_id.to_string()),
                    (
                        "tpl_value".to_string(),
                        build_tpl_value(content, &options.params),
                    ),
                ],
            ),
            None => (
                "sms/send.json",
                vec![
                    ("apikey".to_string(), self.config.apikey.clone()),
                    ("mobile".to_string(), phone.to_string()),
                    ("text".to_string(), content.to_string()),
                ],
            ),
        };

        let body = self.post_with_retry(path, &form).await?;
        let receipt = parse_send_response(&body)?;

        info!(
            "SMS accepted for {} with sid {}",
            mask_phone(phone),
            receipt.sid
        );
        Ok(receipt)
    }

    async fn find_by_sid(&self, sid: &str) -> Result<Option<SmsDetail>, GatewayError> {
        let form = vec![
            ("apikey".to_string(), self.config.apikey.clone()),
            ("sid".to_string(), sid.to_string()),
        ];

        let body = self.post_with_retry("sms/get.json", &form).await?;
        parse_get_response(&body)
    }

    fn is_valid_phone(&self, phone: &str) -> bool {
        is_valid_phone(phone)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    pub(crate) code: i64,
    #[serde(default)]
    pub(crate) msg: Option<String>,
    #[serde(default)]
    pub(crate) result: Option<SendResult>,
    #[serde(default)]
    pub(crate) sms: Option<SmsRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SendResult {
    #[serde(default)]
    pub(crate) sid: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) count: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) fee: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SmsRecord {
    #[serde(default)]
    pub(crate) sid: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) mobile: Option<String>,
    #[serde(default)]
    pub(crate) text: Option<String>,
    #[serde(default)]
    pub(crate) send_status: Option<String>,
    #[serde(default)]
    pub(crate) report_status: Option<String>,
    #[serde(default)]
    pub(crate) fee: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) send_time: Option<String>,
    #[serde(default)]
    pub(crate) user_receive_time: Option<String>,
    #[serde(default)]
    pub(crate) error_msg: Option<String>,
}

// The gateway is inconsistent about numbers: "1" and 1 both occur.
pub(crate) fn value_to_u32(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as u32),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// Timestamps arrive as wall-clock time without a zone marker
pub(crate) fn parse_gateway_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub(crate) fn parse_send_response(body: &str) -> Result<DeliveryReceipt, GatewayError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| GatewayError::Malformed {
            message: e.to_string(),
        })?;

    if envelope.code != 0 {
        return Err(GatewayError::Rejected {
            message: envelope
                .msg
                .unwrap_or_else(|| format!("gateway code {}", envelope.code)),
        });
    }

    let result = envelope.result.ok_or_else(|| GatewayError::Malformed {
        message: "send response missing result".to_string(),
    })?;
    let sid = result
        .sid
        .as_ref()
        .and_then(value_to_string)
        .ok_or_else(|| GatewayError::Malformed {
            message: "send response missing sid".to_string(),
        })?;

    Ok(DeliveryReceipt {
        sid,
        count: result.count.as_ref().and_then(value_to_u32).unwrap_or(1),
        fee: result.fee.as_ref().and_then(value_to_u32).unwrap_or(0),
    })
}

pub(crate) fn parse_get_response(body: &str) -> Result<Option<SmsDetail>, GatewayError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| GatewayError::Malformed {
            message: e.to_string(),
        })?;

    if envelope.code != 0 {
        return Err(GatewayError::Rejected {
            message: envelope
                .msg
                .unwrap_or_else(|| format!("gateway code {}", envelope.code)),
        });
    }

    Ok(envelope.sms.map(|record| SmsDetail {
        sid: record
            .sid
            .as_ref()
            .and_then(value_to_string)
            .unwrap_or_default(),
        mobile: record.mobile.unwrap_or_default(),
        text: record.text.unwrap_or_default(),
        send_status: record.send_status,
        report_status: record.report_status,
        fee: record.fee.as_ref().and_then(value_to_u32),
        send_time: record.send_time.as_deref().and_then(parse_gateway_time),
        user_receive_time: record
            .user_receive_time
            .as_deref()
            .and_then(parse_gateway_time),
        error_msg: record.error_msg,
    }))
}

/// Template values in the `#name#=value` form the gateway expects
pub(crate) fn build_tpl_value(code: &str, params: &HashMap<String, String>) -> String {
    let mut pairs = vec![format!("#code#={}", code)];
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    for key in keys {
        pairs.push(format!("#{}#={}", key, params[key]));
    }
    pairs.join("&")
}
