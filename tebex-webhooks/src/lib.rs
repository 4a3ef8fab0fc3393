//! Incoming webhooks for Tebex
//!
//! Tebex notifies stores of payments, disputes, recurring payments and
//! abandoned baskets by POSTing a JSON envelope to a registered endpoint.
//! This crate parses those envelopes and authenticates them.
//!
//! # Features
//!
//! - **Envelope parsing**: id, type, date and a subject typed from the webhook type
//! - **Signature verification**: HMAC-SHA256 over the SHA-256 digest of the
//!   canonical payload
//! - **Origin check**: fixed Tebex source addresses
//! - **Ordered ingestion**: every check runs in a fixed order and the first
//!   failure is reported
//!
//! # Example: Receiving Webhooks
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//! use tebex_webhooks::{WebhookReceiver, WebhookType};
//!
//! let receiver = WebhookReceiver::with_secret("your-webhook-secret");
//!
//! let body = r#"{"id":"1","type":"payment.completed","date":"2024-01-01","subject":{"status":{"id":1}}}"#;
//! let mut headers = HashMap::new();
//! headers.insert("X-Signature".to_string(), "…".to_string());
//! headers.insert("X-Forwarded-For".to_string(), "18.209.80.3".to_string());
//!
//! match receiver.parse(body, &headers) {
//!     Ok(webhook) if webhook.is_type(WebhookType::ValidationWebhook) => {
//!         // respond with {"id": webhook.id()}
//!     }
//!     Ok(webhook) if webhook.is_status_complete() => {
//!         // fulfil the order
//!     }
//!     Ok(_) => {}
//!     Err(err) => eprintln!("rejected: {err}"),
//! }
//! ```

mod config;
mod envelope;
mod error;
pub mod origin;
mod receiver;
mod signature;
mod types;

pub use config::{WebhookConfig, WebhookConfigBuilder, headers};
pub use envelope::{Subject, Webhook};
pub use error::WebhookError;
pub use origin::ALLOWED_IPS;
pub use receiver::WebhookReceiver;
pub use signature::WebhookSignature;
pub use types::{SubjectKind, WebhookStatus, WebhookType};

/// Result type for webhook operations
pub type Result<T> = std::result::Result<T, WebhookError>;
