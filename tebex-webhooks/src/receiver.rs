//! Webhook receiver for handling incoming Tebex deliveries

use crate::config::WebhookConfig;
use crate::envelope::{Webhook, is_falsy};
use crate::signature::WebhookSignature;
use crate::types::WebhookType;
use crate::{Result, WebhookError};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Receiver for incoming webhooks
#[derive(Debug)]
pub struct WebhookReceiver {
    config: WebhookConfig,
    signature: WebhookSignature,
}

impl WebhookReceiver {
    /// Create a receiver from a full configuration
    pub fn new(config: WebhookConfig) -> Self {
        let signature = WebhookSignature::new(config.secret.expose_secret());
        Self { config, signature }
    }

    /// Create a receiver with default header names and the given secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self::new(WebhookConfig::builder().secret(secret).build())
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Whether a non-empty secret is configured
    pub fn is_secret_key_set(&self) -> bool {
        self.signature.is_secret_set()
    }

    /// Check a signature against a parsed webhook using the configured secret
    pub fn validate_webhook_signature(&self, webhook: &Webhook, expected: &str) -> bool {
        webhook.verify_with(&self.signature, expected)
    }

    /// Check a source address for a parsed webhook
    pub fn validate_webhook_ip(&self, webhook: &Webhook, ip: &str) -> bool {
        webhook.validate_ip(ip)
    }

    /// Parse and authenticate an incoming delivery.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// signature header present, body is JSON, type known, subject present,
    /// envelope well formed, origin allowed, signature valid.
    pub fn parse(&self, raw: &str, headers: &HashMap<String, String>) -> Result<Webhook> {
        let Some(signature) = find_header(headers, &self.config.signature_header) else {
            warn!("Rejected webhook: signature header missing");
            return Err(WebhookError::MissingSignatureHeader);
        };

        let decoded: Value = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "Rejected webhook: malformed JSON");
            WebhookError::MalformedPayload(e.to_string())
        })?;
        if is_falsy(&decoded) {
            warn!("Rejected webhook: empty JSON payload");
            return Err(WebhookError::MalformedPayload(raw.to_string()));
        }

        let webhook_type = check_type(&decoded)?;
        check_subject(&decoded)?;

        let webhook = Webhook::from_decoded(raw.to_string(), decoded).inspect_err(|e| {
            warn!(error = %e, "Rejected webhook: malformed envelope");
        })?;

        let origin = find_header(headers, &self.config.forwarded_for_header)
            .or_else(|| find_header(headers, &self.config.remote_addr_header));
        match origin {
            Some(ip) if self.validate_webhook_ip(&webhook, ip) => {}
            other => {
                let ip = other.unwrap_or_default().to_string();
                warn!(ip = %ip, "Rejected webhook: origin not allowed");
                return Err(WebhookError::InvalidOrigin(ip));
            }
        }

        if !self.validate_webhook_signature(&webhook, signature) {
            warn!(
                webhook_id = webhook.id().unwrap_or_default(),
                "Rejected webhook: signature mismatch"
            );
            return Err(WebhookError::InvalidSignature);
        }

        debug!(
            webhook_id = webhook.id().unwrap_or_default(),
            webhook_type = %webhook_type,
            "Webhook accepted"
        );
        Ok(webhook)
    }
}

fn check_type(decoded: &Value) -> Result<WebhookType> {
    let ty = decoded.get("type").filter(|ty| !is_falsy(ty));
    let Some(ty) = ty else {
        warn!("Rejected webhook: type missing");
        return Err(WebhookError::MissingField("type"));
    };

    let recognised = ty.as_str().and_then(WebhookType::from_wire);
    recognised.ok_or_else(|| {
        let ty = ty.as_str().map_or_else(|| ty.to_string(), str::to_string);
        warn!(webhook_type = %ty, "Rejected webhook: unrecognized type");
        WebhookError::UnrecognizedType(ty)
    })
}

fn check_subject(decoded: &Value) -> Result<()> {
    match decoded.get("subject") {
        None => {
            warn!("Rejected webhook: subject missing");
            Err(WebhookError::MissingField("subject"))
        }
        Some(Value::Null) => {
            warn!("Rejected webhook: subject is null");
            Err(WebhookError::NullField("subject"))
        }
        Some(_) => Ok(()),
    }
}

/// Normalize a header name so `X-Signature`, `x-signature` and
/// `HTTP_X_SIGNATURE` compare equal
fn normalize_header_name(name: &str) -> String {
    let upper = name.trim().to_ascii_uppercase().replace('-', "_");
    match upper.strip_prefix("HTTP_") {
        Some(rest) => rest.to_string(),
        None => upper,
    }
}

/// Look up a non-empty header value by any spelling of its name.
///
/// The configured name is tried first, then `x-name`, `X_NAME` and
/// `HTTP_X_NAME`. Any other key that normalizes to the same name comes last,
/// smallest key first, so the result never depends on hash order.
fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    let wanted = normalize_header_name(name);
    let spellings = [
        name.to_string(),
        wanted.replace('_', "-").to_ascii_lowercase(),
        wanted.clone(),
        format!("HTTP_{wanted}"),
    ];

    let non_empty = |value: &'a String| Some(value.trim()).filter(|v| !v.is_empty());
    let by_spelling = spellings
        .iter()
        .find_map(|key| headers.get(key).and_then(non_empty));

    by_spelling.or_else(|| {
        let mut rest: Vec<(&String, &str)> = headers
            .iter()
            .filter(|(key, _)| normalize_header_name(key) == wanted)
            .filter_map(|(key, value)| non_empty(value).map(|v| (key, v)))
            .collect();
        rest.sort_by(|a, b| a.0.cmp(b.0));
        rest.first().map(|(_, value)| *value)
    })
}
