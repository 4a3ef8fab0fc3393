//! Configuration for the webhook receiver

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Header names Tebex deliveries are read from
pub mod headers {
    /// Signature of the canonical payload
    pub const SIGNATURE: &str = "X-Signature";

    /// Client address set by a reverse proxy
    pub const FORWARDED_FOR: &str = "X-Forwarded-For";

    /// Peer address, as CGI-style servers expose it
    pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
}

/// Configuration for the webhook receiver.
///
/// Header names are matched case-insensitively, and CGI-style variants
/// (`HTTP_X_SIGNATURE` for `X-Signature`) are accepted too.
pub struct WebhookConfig {
    /// Webhook secret from the Tebex panel
    pub secret: SecretString,

    /// Header carrying the signature
    pub signature_header: String,

    /// Header carrying the proxied client address, preferred when present
    pub forwarded_for_header: String,

    /// Header carrying the direct peer address
    pub remote_addr_header: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: SecretString::new(String::new().into()),
            signature_header: headers::SIGNATURE.to_string(),
            forwarded_for_header: headers::FORWARDED_FOR.to_string(),
            remote_addr_header: headers::REMOTE_ADDR.to_string(),
        }
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"[REDACTED]")
            .field("signature_header", &self.signature_header)
            .field("forwarded_for_header", &self.forwarded_for_header)
            .field("remote_addr_header", &self.remote_addr_header)
            .finish()
    }
}

impl WebhookConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for custom configuration
    pub fn builder() -> WebhookConfigBuilder {
        WebhookConfigBuilder::new()
    }

    /// Whether a non-empty secret is configured
    pub fn is_secret_set(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }
}

/// Builder for WebhookConfig
#[derive(Debug, Default)]
pub struct WebhookConfigBuilder {
    config: WebhookConfig,
}

impl WebhookConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the webhook secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.config.secret = SecretString::new(secret.into().into());
        self
    }

    /// Set the signature header name
    pub fn signature_header(mut self, name: impl Into<String>) -> Self {
        self.config.signature_header = name.into();
        self
    }

    /// Set the forwarded-for header name
    pub fn forwarded_for_header(mut self, name: impl Into<String>) -> Self {
        self.config.forwarded_for_header = name.into();
        self
    }

    /// Set the remote address header name
    pub fn remote_addr_header(mut self, name: impl Into<String>) -> Self {
        self.config.remote_addr_header = name.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> WebhookConfig {
        self.config
    }
}
