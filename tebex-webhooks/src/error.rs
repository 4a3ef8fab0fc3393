//! Error types for webhook ingestion

use thiserror::Error;

/// Reasons an incoming webhook is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// Body is not valid JSON or decodes to a falsy value
    #[error("Invalid or malformed webhook JSON: {0}")]
    MalformedPayload(String),

    /// Subject is absent or decodes to a falsy value
    #[error("Invalid or malformed webhook subject: {0}")]
    MalformedSubject(String),

    /// A required envelope member is missing
    #[error("Webhook is missing {0} from the payload")]
    MissingField(&'static str),

    /// A required envelope member is explicitly null
    #[error("Webhook {0} is null in payload")]
    NullField(&'static str),

    /// Type is not one of the known webhook types
    #[error("Unrecognized webhook type: {0}")]
    UnrecognizedType(String),

    /// Signature header missing or empty
    #[error("Signature header is missing from the request")]
    MissingSignatureHeader,

    /// Request did not come from a Tebex address
    #[error(
        "Invalid webhook origin IP {0}. Ensure client IPs are forwarded appropriately if using a proxy"
    )]
    InvalidOrigin(String),

    /// Signature does not match the payload
    #[error("Invalid webhook signature")]
    InvalidSignature,
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        assert_eq!(
            WebhookError::MissingField("subject").to_string(),
            "Webhook is missing subject from the payload"
        );
        assert_eq!(
            WebhookError::UnrecognizedType("made.up.type".into()).to_string(),
            "Unrecognized webhook type: made.up.type"
        );
        assert!(
            WebhookError::InvalidOrigin("203.0.113.5".into())
                .to_string()
                .contains("203.0.113.5")
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            WebhookError::from(err),
            WebhookError::MalformedPayload(_)
        ));
    }
}
