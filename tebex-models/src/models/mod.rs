//! Typed models for the Checkout and Headless APIs
//!
//! The two APIs reuse type names (`Basket`, `Package`, ...) with different
//! shapes, so each has its own registry. Both are built on first use and
//! never change afterwards.

use crate::registry::Registry;
use once_cell::sync::Lazy;

/// Declare a model struct together with its field table.
///
/// Every member is optional on the domain side because the codec omits members
/// that are absent on the wire.
macro_rules! model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident as $type_name:literal {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty => ($wire:literal, $local:literal, $desc:literal)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                #[serde(rename = $local, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::registry::Described for $name {
            const TYPE_NAME: &'static str = $type_name;
            const FIELDS: &'static [$crate::registry::Field] = &[
                $( $crate::registry::Field::new($wire, $local, $desc) ),*
            ];
        }
    };
}

/// Declare a string enum together with its legal literals.
macro_rules! model_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $enum_name:literal {
            $( $(#[$variant_meta:meta])* $variant:ident = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )*
        }

        impl $name {
            /// Wire literal
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )*
                }
            }
        }

        impl $crate::registry::DescribedEnum for $name {
            const ENUM_NAME: &'static str = $enum_name;
            const VALUES: &'static [&'static str] = &[$($wire),*];
        }
    };
}

pub mod checkout;
pub mod headless;

static CHECKOUT: Lazy<Registry> = Lazy::new(checkout::registry);
static HEADLESS: Lazy<Registry> = Lazy::new(headless::registry);

/// Process-wide registry for the Checkout API and webhook subjects
pub fn checkout_registry() -> &'static Registry {
    &CHECKOUT
}

/// Process-wide registry for the Headless API
pub fn headless_registry() -> &'static Registry {
    &HEADLESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Descriptor, Primitive};
    use serde_json::{Value, json};

    /// Every named type a field refers to must be registered in the same
    /// registry, as a composite or as an enum.
    fn assert_closed(registry: &Registry) {
        for name in registry.type_names() {
            let entry = registry.entry(name).unwrap();
            for field in entry.fields() {
                if let Some(target) = field.descriptor.innermost_name() {
                    assert!(
                        registry.contains(target) || registry.is_enum(target),
                        "{name}.{} refers to unknown type {target}",
                        field.wire_name
                    );
                }
            }
        }
    }

    /// A wire value of the shape `descriptor` describes, with every member
    /// of every composite present down to `depth` levels.
    fn sample_wire(registry: &Registry, descriptor: &Descriptor, depth: usize) -> Value {
        match descriptor {
            Descriptor::Primitive(Primitive::String) => json!("sample"),
            Descriptor::Primitive(Primitive::Boolean) => json!(true),
            Descriptor::Primitive(Primitive::Any) => json!({"nested": ["any", 1]}),
            Descriptor::Primitive(_) => json!(7),
            Descriptor::Date => json!("2024-04-02T10:19:05.000Z"),
            Descriptor::Nullable(inner) | Descriptor::Optional(inner) => {
                sample_wire(registry, inner, depth)
            }
            Descriptor::Array(inner) => json!([sample_wire(registry, inner, depth)]),
            Descriptor::Map(inner) => json!({"first": sample_wire(registry, inner, depth)}),
            Descriptor::Named(name) => {
                if let Some(values) = registry.enum_values(name) {
                    return json!(values[0]);
                }
                match registry.entry(name) {
                    Some(_) if depth == 0 => Value::Null,
                    Some(entry) => Value::Object(
                        entry
                            .fields()
                            .iter()
                            .map(|field| {
                                (
                                    field.wire_name.clone(),
                                    sample_wire(registry, &field.descriptor, depth - 1),
                                )
                            })
                            .collect(),
                    ),
                    None => json!("unregistered"),
                }
            }
        }
    }

    fn assert_round_trips(registry: &Registry) {
        let codec = registry.codec();
        let names: Vec<&str> = registry.type_names().collect();
        assert!(!names.is_empty());

        for name in names {
            let descriptor = Descriptor::named(name);
            let wire = sample_wire(registry, &descriptor, 3);

            let model = codec.deserialize(Some(&wire), &descriptor).unwrap();
            let back = codec.serialize(Some(&model), &descriptor).unwrap();
            assert_eq!(back, wire, "{name} did not survive a round trip");

            let again = codec.deserialize(Some(&back), &descriptor).unwrap();
            assert_eq!(again, model, "{name} decoded differently the second time");
        }
    }

    #[test]
    fn test_every_checkout_type_round_trips() {
        assert_round_trips(checkout_registry());
    }

    #[test]
    fn test_every_headless_type_round_trips() {
        assert_round_trips(headless_registry());
    }

    #[test]
    fn test_checkout_registry_is_closed() {
        assert_closed(checkout_registry());
    }

    #[test]
    fn test_headless_registry_is_closed() {
        assert_closed(headless_registry());
    }

    #[test]
    fn test_registries_are_shared() {
        assert!(std::ptr::eq(checkout_registry(), checkout_registry()));
    }

    #[test]
    fn test_same_name_differs_between_registries() {
        let checkout = checkout_registry().entry("Package").unwrap();
        let headless = headless_registry().entry("Package").unwrap();
        assert_ne!(checkout.fields(), headless.fields());
        assert_eq!(
            checkout.field_by_wire_name("type").unwrap().descriptor,
            Descriptor::named("Package.TypeEnum")
        );
    }
}
