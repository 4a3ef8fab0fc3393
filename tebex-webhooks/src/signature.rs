//! Webhook signature generation and verification
//!
//! Tebex signs the SHA-256 digest of the payload rather than the payload
//! itself: `hex(HMAC-SHA256(secret, hex(SHA-256(payload))))`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Webhook signature utilities
#[derive(Debug)]
pub struct WebhookSignature {
    secret: SecretString,
}

impl WebhookSignature {
    /// Create a new signature utility with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into().into()),
        }
    }

    /// Whether a non-empty secret was configured
    pub fn is_secret_set(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// Lowercase hex SHA-256 of the payload, the first signing stage
    pub fn payload_digest(payload: &str) -> String {
        hex::encode(Sha256::digest(payload.as_bytes()))
    }

    /// Generate the signature Tebex sends for `payload`
    pub fn sign(&self, payload: &str) -> String {
        let digest = Self::payload_digest(payload);
        self.compute_hmac_sha256(digest.as_bytes())
    }

    /// Check `expected` against the signature of `payload`
    pub fn verify(&self, payload: &str, expected: &str) -> bool {
        constant_time_compare(&self.sign(payload), expected)
    }

    fn compute_hmac_sha256(&self, data: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take any size key");
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Constant-time string comparison
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
