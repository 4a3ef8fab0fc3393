//! Parsed webhook envelope

use crate::origin;
use crate::signature::WebhookSignature;
use crate::types::{SubjectKind, WebhookStatus, WebhookType};
use crate::{Result, WebhookError};
use serde_json::{Map, Value};
use tebex_models::ModelResult;
use tebex_models::models::checkout::{PaymentSubject, RecurringPaymentSubject};
use tebex_models::models::checkout_registry;
use tracing::trace;

/// What a webhook concerns
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// Subject of a payment or dispute webhook
    Payment(Value),
    /// Subject of a recurring payment webhook
    RecurringPayment(Value),
    /// Subject of any other webhook, as received
    Untyped(Value),
    /// Validation pings carry no subject
    Empty,
}

impl Subject {
    fn new(kind: SubjectKind, value: Value) -> Self {
        match kind {
            SubjectKind::Payment => Self::Payment(value),
            SubjectKind::RecurringPayment => Self::RecurringPayment(value),
            SubjectKind::Untyped => Self::Untyped(value),
            SubjectKind::Empty => Self::Empty,
        }
    }

    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Payment(_) => SubjectKind::Payment,
            Self::RecurringPayment(_) => SubjectKind::RecurringPayment,
            Self::Untyped(_) => SubjectKind::Untyped,
            Self::Empty => SubjectKind::Empty,
        }
    }

    /// Wire value of the subject; `None` for an empty subject
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Payment(value) | Self::RecurringPayment(value) | Self::Untyped(value) => {
                Some(value)
            }
            Self::Empty => None,
        }
    }

    /// Wire value of the subject, `{}` when empty
    pub fn to_json(&self) -> Value {
        self.value()
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// An incoming webhook.
///
/// Built once from the raw body and never changed afterwards. The canonical
/// payload used for signing is the compact re-encoding of the body, so
/// whitespace differences between sender and receiver do not matter.
#[derive(Debug, Clone, PartialEq)]
pub struct Webhook {
    raw_json: String,
    canonical_json: String,
    id: Option<Value>,
    event_type: Option<Value>,
    date: Option<Value>,
    subject: Subject,
}

impl Webhook {
    /// Parse a raw webhook body.
    ///
    /// Only the body's shape is checked here. Type membership, origin and
    /// signature are checked by
    /// [`WebhookReceiver::parse`](crate::WebhookReceiver::parse).
    pub fn from_json(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let decoded: Value = serde_json::from_str(&raw)?;
        Self::from_decoded(raw, decoded)
    }

    pub(crate) fn from_decoded(raw: String, decoded: Value) -> Result<Self> {
        if is_falsy(&decoded) {
            return Err(WebhookError::MalformedPayload(raw));
        }

        let canonical_json = serde_json::to_string(&decoded)?;

        let subject = match decoded.get("subject") {
            Some(subject) if !is_falsy(subject) => subject.clone(),
            Some(subject) => return Err(WebhookError::MalformedSubject(subject.to_string())),
            None => return Err(WebhookError::MalformedSubject("undefined".to_string())),
        };
        // senders may encode an empty object as an empty list
        let subject = match subject {
            Value::Array(items) if items.is_empty() => Value::Object(Map::new()),
            other => other,
        };

        let event_type = decoded.get("type").cloned();
        let kind = SubjectKind::infer(event_type.as_ref().and_then(Value::as_str).unwrap_or(""));
        trace!(?kind, "Webhook subject typed");

        Ok(Self {
            id: decoded.get("id").cloned(),
            date: decoded.get("date").cloned(),
            event_type,
            subject: Subject::new(kind, subject),
            raw_json: raw,
            canonical_json,
        })
    }

    /// The webhook's unique id
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().and_then(Value::as_str)
    }

    /// The `id` member exactly as received
    pub fn id_value(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// The type string as received, or `""` when absent
    pub fn event_type(&self) -> &str {
        self.event_type
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The type, when it is one Tebex documents
    pub fn webhook_type(&self) -> Option<WebhookType> {
        WebhookType::from_wire(self.event_type())
    }

    /// The send date, as received
    pub fn date(&self) -> Option<&str> {
        self.date.as_ref().and_then(Value::as_str)
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The body exactly as received
    pub fn raw_json(&self) -> &str {
        &self.raw_json
    }

    /// The body re-encoded without formatting; this is what gets signed
    pub fn canonical_json(&self) -> &str {
        &self.canonical_json
    }

    /// Regards a one-off payment, disputes included
    pub fn is_type_of_payment(&self) -> bool {
        let ty = self.event_type();
        ty.contains("payment") && !ty.contains("recurring")
    }

    pub fn is_type_of_dispute(&self) -> bool {
        self.event_type().contains("dispute")
    }

    pub fn is_type_of_recurring_payment(&self) -> bool {
        self.event_type().contains("recurring-payment")
    }

    pub fn is_type(&self, ty: WebhookType) -> bool {
        self.event_type() == ty.as_str()
    }

    /// Numeric `subject.status.id`, if present
    pub fn status_id(&self) -> Option<i64> {
        let id = self.subject.value()?.get("status")?.get("id")?;
        id.as_i64().or_else(|| {
            id.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    pub fn status(&self) -> Option<WebhookStatus> {
        self.status_id().and_then(WebhookStatus::from_id)
    }

    /// Whether `subject.status.id` says the payment completed.
    ///
    /// A missing status is not complete.
    pub fn is_status_complete(&self) -> bool {
        self.status_id() == Some(WebhookStatus::Complete.id())
    }

    /// Check a source address against the Tebex allowlist
    pub fn validate_ip(&self, ip: &str) -> bool {
        origin::is_allowed(ip)
    }

    /// Check `expected` against the signature of the canonical payload
    pub fn validate_signature(&self, expected: &str, secret: &str) -> bool {
        WebhookSignature::new(secret).verify(&self.canonical_json, expected)
    }

    pub(crate) fn verify_with(&self, signature: &WebhookSignature, expected: &str) -> bool {
        signature.verify(&self.canonical_json, expected)
    }

    /// Decode a payment subject into its typed model
    pub fn payment_subject(&self) -> ModelResult<Option<PaymentSubject>> {
        match &self.subject {
            Subject::Payment(value) => checkout_registry().codec().decode(value).map(Some),
            _ => Ok(None),
        }
    }

    /// Decode a recurring payment subject into its typed model
    pub fn recurring_payment_subject(&self) -> ModelResult<Option<RecurringPaymentSubject>> {
        match &self.subject {
            Subject::RecurringPayment(value) => {
                checkout_registry().codec().decode(value).map(Some)
            }
            _ => Ok(None),
        }
    }
}

/// JSON values a loosely typed sender would treat as "nothing"
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
