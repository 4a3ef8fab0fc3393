//! Fuzz target for webhook ingestion.
//!
//! Feeds arbitrary bodies and headers through the receiver. A delivery
//! signed with the receiver's secret from an allowed address must never
//! fail on origin or signature.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;
use tebex_webhooks::{ALLOWED_IPS, Webhook, WebhookError, WebhookReceiver, WebhookSignature};

const SECRET: &str = "whsec_fuzz";

#[derive(Debug, Arbitrary)]
struct FuzzDelivery {
    body: String,
    headers: Vec<(String, String)>,
    sign: bool,
    forwarded: bool,
}

fuzz_target!(|data: FuzzDelivery| {
    let receiver = WebhookReceiver::with_secret(SECRET);

    // Arbitrary headers
    let headers: HashMap<String, String> = data.headers.into_iter().collect();
    let _ = receiver.parse(&data.body, &headers);

    let Ok(webhook) = Webhook::from_json(data.body.as_str()) else {
        return;
    };

    // Accessors must not panic on any envelope that parsed
    let _ = webhook.webhook_type();
    let _ = webhook.status_id();
    let _ = webhook.is_status_complete();
    let _ = webhook.payment_subject();
    let _ = webhook.recurring_payment_subject();

    let mut headers = HashMap::new();
    let signature = WebhookSignature::new(SECRET).sign(webhook.canonical_json());
    headers.insert(
        "X-Signature".to_string(),
        if data.sign { signature } else { "0".repeat(64) },
    );
    if data.forwarded {
        headers.insert("X-Forwarded-For".to_string(), ALLOWED_IPS[0].to_string());
    } else {
        headers.insert("REMOTE_ADDR".to_string(), ALLOWED_IPS[1].to_string());
    }

    match receiver.parse(&data.body, &headers) {
        Ok(parsed) => assert_eq!(parsed.canonical_json(), webhook.canonical_json()),
        Err(WebhookError::InvalidOrigin(_)) => panic!("allowed address rejected"),
        Err(WebhookError::InvalidSignature) => assert!(!data.sign),
        Err(_) => {}
    }
});
