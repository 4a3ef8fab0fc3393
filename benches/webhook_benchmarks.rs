//! Webhook Ingestion Benchmarks
//!
//! Measures envelope parsing, signature computation and the full
//! receive pipeline.
//!
//! Run benchmarks:
//!   cargo bench --bench webhook_benchmarks

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::collections::HashMap;
use std::hint::black_box;
use tebex::tebex_webhooks::{WebhookSignature, origin};
use tebex::{Webhook, WebhookReceiver};

const SECRET: &str = "whsec_benchmark";

fn payment_body() -> String {
    json!({
        "id": "b2a6e3ac-91b4-4a1e-93d6-1b5b1e7a9f11",
        "type": "payment.completed",
        "date": "2024-04-02T10:19:05+00:00",
        "subject": {
            "transaction_id": "tbx-26929122a56954-1a8ea4",
            "status": {"id": 1, "description": "Complete"},
            "payment_sequence": "oneoff",
            "created_at": "2024-04-02T10:19:05.000Z",
            "price": {"amount": 1.50, "currency": "USD"},
            "customer": {
                "first_name": "Tebex",
                "last_name": "Integrations",
                "email": "integrations@tebex.io",
                "username": {"id": "4b7d8a3c", "username": "tebex_dev"}
            },
            "products": [{"id": 6276316, "name": "VIP", "quantity": 1}],
            "coupons": [],
            "custom": {}
        }
    })
    .to_string()
}

fn delivery_headers(body: &str) -> HashMap<String, String> {
    let webhook = Webhook::from_json(body).unwrap();
    let mut headers = HashMap::new();
    headers.insert(
        "X-Signature".to_string(),
        WebhookSignature::new(SECRET).sign(webhook.canonical_json()),
    );
    headers.insert("X-Forwarded-For".to_string(), "18.209.80.3".to_string());
    headers
}

// ============================================================================
// Envelope Parsing
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhook_envelope");
    let body = payment_body();

    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("from_json", |b| {
        b.iter(|| Webhook::from_json(black_box(body.as_str())).unwrap())
    });

    let webhook = Webhook::from_json(body.as_str()).unwrap();
    group.bench_function("payment_subject", |b| {
        b.iter(|| black_box(&webhook).payment_subject().unwrap())
    });

    group.finish();
}

// ============================================================================
// Signature
// ============================================================================

fn bench_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhook_signature");
    let signer = WebhookSignature::new(SECRET);
    let payload = Webhook::from_json(payment_body())
        .unwrap()
        .canonical_json()
        .to_string();
    let expected = signer.sign(&payload);

    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("sign", |b| b.iter(|| signer.sign(black_box(&payload))));
    group.bench_function("verify", |b| {
        b.iter(|| signer.verify(black_box(&payload), black_box(&expected)))
    });

    group.finish();
}

fn bench_origin(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhook_origin");

    group.bench_function("allowed", |b| {
        b.iter(|| origin::is_allowed(black_box("54.87.231.232")))
    });
    group.bench_function("rejected", |b| {
        b.iter(|| origin::is_allowed(black_box("203.0.113.5")))
    });

    group.finish();
}

// ============================================================================
// Full Pipeline
// ============================================================================

fn bench_receiver(c: &mut Criterion) {
    let mut group = c.benchmark_group("webhook_receiver");
    let receiver = WebhookReceiver::with_secret(SECRET);
    let body = payment_body();
    let headers = delivery_headers(&body);

    group.throughput(Throughput::Bytes(body.len() as u64));
    group.bench_function("accept", |b| {
        b.iter(|| receiver.parse(black_box(&body), &headers).unwrap())
    });

    let mut forged = headers.clone();
    forged.insert("X-Signature".to_string(), "0".repeat(64));
    group.bench_function("reject_signature", |b| {
        b.iter(|| receiver.parse(black_box(&body), &forged).unwrap_err())
    });

    group.finish();
}

criterion_group!(
    webhook_benches,
    bench_envelope,
    bench_signature,
    bench_origin,
    bench_receiver,
);

criterion_main!(webhook_benches);
