//! Type registry, wire codec and models for the Tebex APIs
//!
//! Tebex speaks snake_case JSON with ISO-8601 date strings. This crate turns
//! that wire form into domain values and back, driven by a table of type
//! descriptors rather than per-type code, so an unknown member or a new type on
//! the wire never breaks decoding.
//!
//! # Features
//!
//! - **Descriptor grammar**: `string`, `Date`, `T | null`, `Array<T>`,
//!   `{ [key: string]: T; }` and named types
//! - **Registry**: field tables, enum literals and discriminator-based
//!   polymorphism
//! - **Wire codec**: recursive, order-preserving, never fails
//! - **Typed models**: Checkout and Headless API shapes, including webhook
//!   subjects
//! - **API client**: pluggable [`Transport`] with a reqwest implementation
//!
//! # Example: Decoding a Payment
//!
//! ```rust
//! use tebex_models::models::{checkout::PaymentSubject, checkout_registry};
//! use serde_json::json;
//!
//! let wire = json!({
//!     "transaction_id": "tbx-1",
//!     "status": {"id": 1, "description": "Complete"},
//!     "created_at": "2024-04-02T10:19:05.000Z"
//! });
//!
//! let payment: PaymentSubject = checkout_registry().codec().decode(&wire).unwrap();
//! assert_eq!(payment.transaction_id.as_deref(), Some("tbx-1"));
//! ```
//!
//! # Example: Working with Descriptors
//!
//! ```rust
//! use tebex_models::{Descriptor, Model, models::checkout_registry};
//! use serde_json::json;
//!
//! let codec = checkout_registry().codec();
//! let prices = json!([{"amount": 5, "currency": "EUR"}]);
//!
//! let model = codec
//!     .deserialize(Some(&prices), &Descriptor::parse("Array<PaymentSubjectPrice>"))
//!     .unwrap();
//! assert!(matches!(model, Model::Array(_)));
//! ```

mod client;
mod codec;
mod config;
mod descriptor;
mod error;
pub mod models;
mod registry;
mod value;

pub use client::{ApiClient, ApiRequest, ApiResponse, HttpMethod, ReqwestTransport, Transport};
pub use codec::WireCodec;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
pub use descriptor::{Descriptor, Primitive};
pub use error::{ApiError, ApiResult, ModelError, ModelResult};
pub use registry::{
    Described, DescribedEnum, DiscriminatorSource, Field, FieldEntry, Registry, RegistryBuilder,
    TypeEntry,
};
pub use value::{Model, format_date, parse_date};

/// Prelude for common imports
pub mod prelude {
    pub use crate::client::{ApiClient, ApiRequest, ReqwestTransport, Transport};
    pub use crate::codec::WireCodec;
    pub use crate::config::ClientConfig;
    pub use crate::descriptor::Descriptor;
    pub use crate::error::{ApiError, ModelError};
    pub use crate::models::{checkout_registry, headless_registry};
    pub use crate::registry::{Described, DescribedEnum, Registry};
    pub use crate::value::Model;
}
