//! Fuzz target for the wire codec.
//!
//! Parses arbitrary descriptor text and JSON and runs both conversion
//! directions against the checkout and headless registries.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use tebex_models::models::checkout::{Basket, PaymentSubject};
use tebex_models::models::{checkout_registry, headless_registry};
use tebex_models::{Descriptor, Model};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    descriptor: String,
    json: String,
    headless: bool,
}

fuzz_target!(|data: FuzzInput| {
    let descriptor = Descriptor::parse(&data.descriptor);

    let Ok(wire) = serde_json::from_str::<Value>(&data.json) else {
        return;
    };

    let registry = if data.headless {
        headless_registry()
    } else {
        checkout_registry()
    };
    let codec = registry.codec();

    if let Some(model) = codec.deserialize(Some(&wire), &descriptor) {
        let _ = codec.serialize(Some(&model), &descriptor);
    }
    let _ = codec.serialize(Some(&Model::from_json(wire.clone())), &descriptor);

    // Typed decoding may fail but must not panic
    let _ = checkout_registry().codec().decode::<PaymentSubject>(&wire);
    let _ = checkout_registry().codec().decode::<Basket>(&wire);
});
