//! Webhook types and payment statuses

use crate::WebhookError;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Every webhook type Tebex sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookType {
    // Payment events
    PaymentCompleted,
    PaymentDeclined,
    PaymentRefunded,

    // Dispute events
    PaymentDisputeOpened,
    PaymentDisputeWon,
    PaymentDisputeLost,
    PaymentDisputeClosed,

    // Recurring payment events
    RecurringPaymentStarted,
    RecurringPaymentRenewed,
    RecurringPaymentStatusChanged,
    RecurringPaymentEnded,
    RecurringPaymentCancellationRequested,
    RecurringPaymentCancellationAborted,

    BasketAbandoned,

    /// Sent when an endpoint is registered, to check that it responds
    ValidationWebhook,
}

impl WebhookType {
    /// All types, in wire order
    pub const ALL: [WebhookType; 15] = [
        Self::PaymentCompleted,
        Self::PaymentDeclined,
        Self::PaymentRefunded,
        Self::PaymentDisputeOpened,
        Self::PaymentDisputeWon,
        Self::PaymentDisputeLost,
        Self::PaymentDisputeClosed,
        Self::RecurringPaymentStarted,
        Self::RecurringPaymentRenewed,
        Self::RecurringPaymentStatusChanged,
        Self::RecurringPaymentEnded,
        Self::RecurringPaymentCancellationRequested,
        Self::RecurringPaymentCancellationAborted,
        Self::BasketAbandoned,
        Self::ValidationWebhook,
    ];

    /// Look up a type by its exact wire string
    pub fn from_wire(s: &str) -> Option<Self> {
        let parsed = match s {
            "payment.completed" => Self::PaymentCompleted,
            "payment.declined" => Self::PaymentDeclined,
            "payment.refunded" => Self::PaymentRefunded,

            "payment.dispute.opened" => Self::PaymentDisputeOpened,
            "payment.dispute.won" => Self::PaymentDisputeWon,
            "payment.dispute.lost" => Self::PaymentDisputeLost,
            "payment.dispute.closed" => Self::PaymentDisputeClosed,

            "recurring-payment.started" => Self::RecurringPaymentStarted,
            "recurring-payment.renewed" => Self::RecurringPaymentRenewed,
            "recurring-payment.status-changed" => Self::RecurringPaymentStatusChanged,
            "recurring-payment.ended" => Self::RecurringPaymentEnded,
            "recurring-payment.cancellation.requested" => {
                Self::RecurringPaymentCancellationRequested
            }
            "recurring-payment.cancellation.aborted" => Self::RecurringPaymentCancellationAborted,

            "basket.abandoned" => Self::BasketAbandoned,
            "validation.webhook" => Self::ValidationWebhook,

            _ => return None,
        };
        Some(parsed)
    }

    /// Wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentCompleted => "payment.completed",
            Self::PaymentDeclined => "payment.declined",
            Self::PaymentRefunded => "payment.refunded",
            Self::PaymentDisputeOpened => "payment.dispute.opened",
            Self::PaymentDisputeWon => "payment.dispute.won",
            Self::PaymentDisputeLost => "payment.dispute.lost",
            Self::PaymentDisputeClosed => "payment.dispute.closed",
            Self::RecurringPaymentStarted => "recurring-payment.started",
            Self::RecurringPaymentRenewed => "recurring-payment.renewed",
            Self::RecurringPaymentStatusChanged => "recurring-payment.status-changed",
            Self::RecurringPaymentEnded => "recurring-payment.ended",
            Self::RecurringPaymentCancellationRequested => {
                "recurring-payment.cancellation.requested"
            }
            Self::RecurringPaymentCancellationAborted => "recurring-payment.cancellation.aborted",
            Self::BasketAbandoned => "basket.abandoned",
            Self::ValidationWebhook => "validation.webhook",
        }
    }

    /// Is a one-off payment event, disputes included
    pub fn is_payment(&self) -> bool {
        matches!(
            self,
            Self::PaymentCompleted | Self::PaymentDeclined | Self::PaymentRefunded
        ) || self.is_dispute()
    }

    /// Is a dispute event
    pub fn is_dispute(&self) -> bool {
        matches!(
            self,
            Self::PaymentDisputeOpened
                | Self::PaymentDisputeWon
                | Self::PaymentDisputeLost
                | Self::PaymentDisputeClosed
        )
    }

    /// Is a recurring payment event
    pub fn is_recurring_payment(&self) -> bool {
        matches!(
            self,
            Self::RecurringPaymentStarted
                | Self::RecurringPaymentRenewed
                | Self::RecurringPaymentStatusChanged
                | Self::RecurringPaymentEnded
                | Self::RecurringPaymentCancellationRequested
                | Self::RecurringPaymentCancellationAborted
        )
    }

    /// Shape of the subject this type carries
    pub fn subject_kind(&self) -> SubjectKind {
        if self.is_payment() {
            SubjectKind::Payment
        } else if self.is_recurring_payment() {
            SubjectKind::RecurringPayment
        } else if *self == Self::ValidationWebhook {
            SubjectKind::Empty
        } else {
            SubjectKind::Untyped
        }
    }
}

impl fmt::Display for WebhookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookType {
    type Err = WebhookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| WebhookError::UnrecognizedType(s.to_string()))
    }
}

/// Shape of a webhook subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    /// A `PaymentSubject`
    Payment,
    /// A `RecurringPaymentSubject`
    RecurringPayment,
    /// Kept as received
    Untyped,
    /// Always `{}`, whatever was sent
    Empty,
}

impl SubjectKind {
    /// Decide the subject shape for a type string.
    ///
    /// Known types use [`WebhookType::subject_kind`]. Anything else is
    /// classified by substring: "payment" without "recurring" (or any
    /// "dispute") is a payment, then "recurring-payment" is a recurring
    /// payment.
    pub fn infer(event_type: &str) -> Self {
        if let Some(known) = WebhookType::from_wire(event_type) {
            return known.subject_kind();
        }

        let payment = event_type.contains("payment") && !event_type.contains("recurring");
        let dispute = event_type.contains("dispute");
        let recurring = event_type.contains("recurring-payment");

        if (payment || dispute) && event_type.contains("recurring") {
            warn!(
                event_type,
                "Webhook type matches both payment and recurring patterns, treating as payment"
            );
        }

        if payment || dispute {
            Self::Payment
        } else if recurring {
            Self::RecurringPayment
        } else {
            Self::Untyped
        }
    }
}

/// Payment status ids carried in `subject.status.id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookStatus {
    Complete,
    Refund,
    Chargeback,
    Declined,
    PendingCheckout,
    RefundPending,
}

impl WebhookStatus {
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Complete),
            2 => Some(Self::Refund),
            3 => Some(Self::Chargeback),
            18 => Some(Self::Declined),
            19 => Some(Self::PendingCheckout),
            21 => Some(Self::RefundPending),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Complete => 1,
            Self::Refund => 2,
            Self::Chargeback => 3,
            Self::Declined => 18,
            Self::PendingCheckout => 19,
            Self::RefundPending => 21,
        }
    }
}
