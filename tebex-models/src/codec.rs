//! Wire codec
//!
//! [`WireCodec`] interprets a [`Descriptor`] against a [`Registry`] to convert
//! between wire JSON (snake_case members, ISO-8601 strings) and domain
//! [`Model`] values (local member names, parsed dates). Both directions walk
//! the descriptor the same way:
//!
//! - undefined (`None`) stays undefined and `null` stays `null`
//! - primitives and enum literals are copied as-is
//! - nullable and optional wrappers are looked through
//! - arrays and maps are converted element by element, keeping order
//! - `Date` is parsed from / rendered to an ISO-8601 string
//! - registered composites are rebuilt from their field table, after the
//!   registry has had a chance to substitute a discriminated type
//!
//! Anything the codec does not understand (unregistered names, values of the
//! wrong shape, unparsable dates) is passed through unchanged. The codec never
//! fails, so schema additions on the wire do not break older clients.

use crate::descriptor::Descriptor;
use crate::error::{ModelError, ModelResult};
use crate::registry::{Described, Registry};
use crate::value::{Model, format_date, parse_date};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

/// Descriptor-driven converter bound to one registry
#[derive(Debug, Clone, Copy)]
pub struct WireCodec<'r> {
    registry: &'r Registry,
}

impl<'r> WireCodec<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Convert a domain value to wire JSON
    pub fn serialize(&self, value: Option<&Model>, descriptor: &Descriptor) -> Option<Value> {
        value.map(|value| self.serialize_value(value, descriptor))
    }

    /// Convert wire JSON to a domain value
    pub fn deserialize(&self, data: Option<&Value>, descriptor: &Descriptor) -> Option<Model> {
        data.map(|data| self.deserialize_value(data, descriptor))
    }

    /// Serialize a typed model through its own field table
    pub fn encode<T>(&self, value: &T) -> ModelResult<Value>
    where
        T: Described + Serialize,
    {
        if !self.registry.contains(T::TYPE_NAME) {
            return Err(ModelError::UnregisteredType(T::TYPE_NAME));
        }
        let local = Model::from_json(serde_json::to_value(value)?);
        Ok(self.serialize_value(&local, &Descriptor::named(T::TYPE_NAME)))
    }

    /// Deserialize wire JSON into a typed model
    pub fn decode<T>(&self, wire: &Value) -> ModelResult<T>
    where
        T: Described + DeserializeOwned,
    {
        if !self.registry.contains(T::TYPE_NAME) {
            return Err(ModelError::UnregisteredType(T::TYPE_NAME));
        }
        let local = self.deserialize_value(wire, &Descriptor::named(T::TYPE_NAME));
        Ok(serde_json::from_value(local.to_json())?)
    }

    fn serialize_value(&self, value: &Model, descriptor: &Descriptor) -> Value {
        if value.is_null() {
            return Value::Null;
        }

        match descriptor {
            Descriptor::Primitive(_) => value.to_json(),
            Descriptor::Nullable(inner) | Descriptor::Optional(inner) => {
                self.serialize_value(value, inner)
            }
            Descriptor::Array(inner) => match value {
                Model::Array(items) => Value::Array(
                    items
                        .iter()
                        .map(|item| self.serialize_value(item, inner))
                        .collect(),
                ),
                other => other.to_json(),
            },
            Descriptor::Map(inner) => match value {
                Model::Object(entries) => Value::Object(
                    entries
                        .iter()
                        .map(|(key, item)| (key.clone(), self.serialize_value(item, inner)))
                        .collect(),
                ),
                other => other.to_json(),
            },
            Descriptor::Date => match value {
                Model::Date(date) => Value::String(format_date(date)),
                Model::String(text) => Value::String(
                    parse_date(text)
                        .map(|date| format_date(&date))
                        .unwrap_or_else(|| text.clone()),
                ),
                other => other.to_json(),
            },
            Descriptor::Named(name) => self.serialize_named(value, name),
        }
    }

    fn serialize_named(&self, value: &Model, declared: &str) -> Value {
        if self.registry.is_enum(declared) {
            return value.to_json();
        }
        if !self.registry.contains(declared) {
            trace!(type_name = declared, "Passing value through unregistered type");
            return value.to_json();
        }
        if !matches!(value, Model::Object(_)) {
            return value.to_json();
        }

        let actual = self.registry.resolve_actual_type(Some(value), declared);
        let Some(entry) = self.registry.entry(actual) else {
            return value.to_json();
        };

        let mut wire = Map::new();
        for field in entry.fields() {
            if let Some(member) = value.get(&field.local_name) {
                wire.insert(
                    field.wire_name.clone(),
                    self.serialize_value(member, &field.descriptor),
                );
            }
        }
        Value::Object(wire)
    }

    fn deserialize_value(&self, data: &Value, descriptor: &Descriptor) -> Model {
        match descriptor {
            // polymorphism may change the actual type before anything else runs
            Descriptor::Named(declared) => {
                let actual = self.registry.resolve_actual_type(Some(data), declared);
                self.deserialize_named(data, actual)
            }
            _ if data.is_null() => Model::Null,
            Descriptor::Primitive(_) => Model::from_json(data.clone()),
            Descriptor::Nullable(inner) | Descriptor::Optional(inner) => {
                self.deserialize_value(data, inner)
            }
            Descriptor::Array(inner) => match data {
                Value::Array(items) => Model::Array(
                    items
                        .iter()
                        .map(|item| self.deserialize_value(item, inner))
                        .collect(),
                ),
                other => Model::from_json(other.clone()),
            },
            Descriptor::Map(inner) => match data {
                Value::Object(entries) => Model::Object(
                    entries
                        .iter()
                        .map(|(key, item)| (key.clone(), self.deserialize_value(item, inner)))
                        .collect(),
                ),
                other => Model::from_json(other.clone()),
            },
            Descriptor::Date => match data {
                Value::String(text) => parse_date(text)
                    .map(Model::Date)
                    .unwrap_or_else(|| Model::String(text.clone())),
                other => Model::from_json(other.clone()),
            },
        }
    }

    fn deserialize_named(&self, data: &Value, name: &str) -> Model {
        if data.is_null() {
            return Model::Null;
        }
        if self.registry.is_enum(name) {
            return Model::from_json(data.clone());
        }
        let Some(entry) = self.registry.entry(name) else {
            trace!(type_name = name, "Passing value through unregistered type");
            return Model::from_json(data.clone());
        };
        let Value::Object(members) = data else {
            return Model::from_json(data.clone());
        };

        let fields = entry
            .fields()
            .iter()
            .filter_map(|field| {
                members.get(&field.wire_name).map(|member| {
                    (
                        field.local_name.clone(),
                        self.deserialize_value(member, &field.descriptor),
                    )
                })
            })
            .collect();
        Model::Object(fields)
    }
}

impl Registry {
    /// A codec reading from this registry
    pub fn codec(&self) -> WireCodec<'_> {
        WireCodec::new(self)
    }
}
