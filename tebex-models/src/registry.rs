//! Type & enum registry
//!
//! A [`Registry`] maps composite type names to their field tables and enum
//! names to their legal literals. It is assembled once through a
//! [`RegistryBuilder`] and is read-only afterwards, so a single instance can be
//! shared freely between threads.

use crate::descriptor::{Descriptor, Primitive};
use crate::value::Model;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// One row of a static field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Member name on the wire
    pub wire: &'static str,
    /// Member name on the domain side
    pub local: &'static str,
    /// Textual type descriptor
    pub ty: &'static str,
}

impl Field {
    pub const fn new(wire: &'static str, local: &'static str, ty: &'static str) -> Self {
        Self { wire, local, ty }
    }
}

/// A composite type with a static field table.
pub trait Described {
    /// Name the type is registered under
    const TYPE_NAME: &'static str;

    /// Member whose value may name a more specific registered type
    const DISCRIMINATOR: Option<&'static str> = None;

    /// Fields in declared order
    const FIELDS: &'static [Field];
}

/// An enum with a fixed set of wire literals.
pub trait DescribedEnum {
    /// Name in `Type.FieldEnum` form
    const ENUM_NAME: &'static str;

    /// Legal wire literals
    const VALUES: &'static [&'static str];
}

/// Anything the registry can read a discriminator value from.
pub trait DiscriminatorSource {
    fn discriminator_value(&self, field: &str) -> Option<&str>;
}

impl DiscriminatorSource for Value {
    fn discriminator_value(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl DiscriminatorSource for Model {
    fn discriminator_value(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Model::as_str)
    }
}

/// A field with its descriptor already parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub wire_name: String,
    pub local_name: String,
    pub descriptor: Descriptor,
}

/// A registered composite type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    name: String,
    discriminator: Option<String>,
    fields: Vec<FieldEntry>,
}

impl TypeEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    /// Find a field by its wire name
    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }

    /// Find a field by its local name
    pub fn field_by_local_name(&self, local_name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.local_name == local_name)
    }
}

/// Read-only table of composite types and enums
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: HashMap<String, TypeEntry>,
    enums: HashMap<String, Vec<String>>,
}

impl Registry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Get the entry for a registered composite
    pub fn entry(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    /// Check whether a composite is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Check whether an enum is registered under `name`
    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    /// Legal literals of a registered enum
    pub fn enum_values(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }

    /// Check a literal against a registered enum. Unknown enums accept nothing.
    pub fn is_legal_enum_value(&self, name: &str, value: &str) -> bool {
        self.enum_values(name)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// Names of all registered composites, in no particular order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Number of registered composites
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Decide which type `data` should be treated as.
    ///
    /// Returns `declared` unless it names a registered composite with a
    /// discriminator whose value in `data` is a non-empty string naming another
    /// registered composite. Compatibility between the two types is not
    /// checked.
    pub fn resolve_actual_type<'a, D>(&'a self, data: Option<&D>, declared: &'a str) -> &'a str
    where
        D: DiscriminatorSource + ?Sized,
    {
        let Some(data) = data else {
            return declared;
        };
        if Primitive::from_name(declared).is_some() || declared == "Date" {
            return declared;
        }
        if self.is_enum(declared) {
            return declared;
        }
        let Some(entry) = self.types.get(declared) else {
            return declared;
        };
        let Some(field) = entry.discriminator.as_deref() else {
            return declared;
        };

        match data.discriminator_value(field) {
            Some(value) if !value.is_empty() => self
                .types
                .get_key_value(value)
                .map(|(name, _)| name.as_str())
                .unwrap_or(declared),
            _ => declared,
        }
    }
}

/// Builder for [`Registry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a typed composite
    pub fn register<T: Described>(self) -> Self {
        self.register_table(T::TYPE_NAME, T::DISCRIMINATOR, T::FIELDS)
    }

    /// Register a composite from a raw field table.
    ///
    /// Registering the same name twice replaces the earlier entry.
    pub fn register_table(
        mut self,
        name: impl Into<String>,
        discriminator: Option<&str>,
        fields: &[Field],
    ) -> Self {
        let name = name.into();
        let fields = fields
            .iter()
            .map(|field| FieldEntry {
                wire_name: field.wire.to_string(),
                local_name: field.local.to_string(),
                descriptor: Descriptor::parse(field.ty),
            })
            .collect();

        self.registry.types.insert(
            name.clone(),
            TypeEntry {
                name,
                discriminator: discriminator.map(str::to_string),
                fields,
            },
        );
        self
    }

    /// Register a typed enum
    pub fn register_enum<E: DescribedEnum>(self) -> Self {
        self.register_enum_values(E::ENUM_NAME, E::VALUES)
    }

    /// Register an enum from raw literals
    pub fn register_enum_values(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.registry
            .enums
            .insert(name.into(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn build(self) -> Registry {
        debug!(
            types = self.registry.types.len(),
            enums = self.registry.enums.len(),
            "Type registry built"
        );
        self.registry
    }
}
