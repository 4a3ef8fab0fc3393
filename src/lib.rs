// Tebex SDK for Rust
//
// Typed models and a descriptor-driven wire codec for the Tebex Checkout and
// Headless APIs, plus parsing and verification of incoming webhooks.

// Re-export models and codec
pub use tebex_models::*;

// Re-export optional crates
#[cfg(feature = "webhooks")]
pub use tebex_webhooks;

#[cfg(feature = "webhooks")]
pub use tebex_webhooks::{Webhook, WebhookError, WebhookReceiver, WebhookType};

// Prelude for common imports
pub mod prelude {
    pub use tebex_models::prelude::*;

    #[cfg(feature = "webhooks")]
    pub use tebex_webhooks::{
        Subject, Webhook, WebhookConfig, WebhookError, WebhookReceiver, WebhookSignature,
        WebhookStatus, WebhookType,
    };
}
