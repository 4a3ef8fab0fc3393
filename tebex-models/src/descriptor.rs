//! Type descriptor grammar
//!
//! Field shapes are written in a small textual grammar inherited from the
//! Tebex OpenAPI schema (`string`, `Date | null`, `Array<PaymentSubject>`,
//! `{ [key: string]: any; }`, ...). The registry parses every field's text once
//! into a [`Descriptor`] so the codec never scans strings at runtime.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

const NULLABLE_SUFFIX: &str = " | null";
const OPTIONAL_SUFFIX: &str = " | undefined";
const ARRAY_PREFIX: &str = "Array<";
const ARRAY_SUFFIX: &str = ">";
const MAP_PREFIX: &str = "{ [key: string]: ";
const MAP_SUFFIXES: [&str; 3] = ["; }", " }", "}"];
const DATE: &str = "Date";

/// Primitive wire types; values of these types are never transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Boolean,
    Double,
    Integer,
    Long,
    Float,
    Number,
    Any,
}

impl Primitive {
    /// Look up a primitive by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "boolean" => Some(Self::Boolean),
            "double" => Some(Self::Double),
            "integer" => Some(Self::Integer),
            "long" => Some(Self::Long),
            "float" => Some(Self::Float),
            "number" => Some(Self::Number),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Double => "double",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Number => "number",
            Self::Any => "any",
        }
    }
}

/// A parsed type descriptor.
///
/// Wrapper variants hold exactly one inner descriptor, so a descriptor is
/// nullable, optional, an array or a map, never several at the same level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// A primitive value passed through untouched
    Primitive(Primitive),
    /// A timestamp carried on the wire as an ISO-8601 string
    Date,
    /// `T | null`
    Nullable(Box<Descriptor>),
    /// `T | undefined`
    Optional(Box<Descriptor>),
    /// `Array<T>`
    Array(Box<Descriptor>),
    /// `{ [key: string]: T; }`
    Map(Box<Descriptor>),
    /// A composite or enum name, resolved against a registry
    Named(String),
}

impl Descriptor {
    /// Parse the textual grammar.
    ///
    /// Primitives are recognised first, then the wrappers are stripped in the
    /// order nullable, optional, array, map. Anything left over that is not
    /// `Date` is a named type. Parsing never fails.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Some(primitive) = Primitive::from_name(text) {
            return Self::Primitive(primitive);
        }
        if let Some(inner) = text.strip_suffix(NULLABLE_SUFFIX) {
            return Self::nullable(Self::parse(inner));
        }
        if let Some(inner) = text.strip_suffix(OPTIONAL_SUFFIX) {
            return Self::optional(Self::parse(inner));
        }
        if let Some(inner) = text
            .strip_prefix(ARRAY_PREFIX)
            .and_then(|rest| rest.strip_suffix(ARRAY_SUFFIX))
        {
            return Self::array(Self::parse(inner));
        }
        if let Some(rest) = text.strip_prefix(MAP_PREFIX) {
            if let Some(inner) = MAP_SUFFIXES
                .iter()
                .find_map(|suffix| rest.strip_suffix(suffix))
            {
                return Self::map(Self::parse(inner));
            }
        }
        if text == DATE {
            return Self::Date;
        }

        Self::Named(text.to_string())
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn nullable(inner: Descriptor) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn optional(inner: Descriptor) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn array(inner: Descriptor) -> Self {
        Self::Array(Box::new(inner))
    }

    pub fn map(inner: Descriptor) -> Self {
        Self::Map(Box::new(inner))
    }

    /// The name of a `Named` descriptor
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The named type this descriptor ultimately refers to, looking through
    /// every wrapper.
    pub fn innermost_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Nullable(inner) | Self::Optional(inner) | Self::Array(inner) | Self::Map(inner) => {
                inner.innermost_name()
            }
            Self::Primitive(_) | Self::Date => None,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.as_str()),
            Self::Date => f.write_str(DATE),
            Self::Nullable(inner) => write!(f, "{inner}{NULLABLE_SUFFIX}"),
            Self::Optional(inner) => write!(f, "{inner}{OPTIONAL_SUFFIX}"),
            Self::Array(inner) => write!(f, "{ARRAY_PREFIX}{inner}{ARRAY_SUFFIX}"),
            Self::Map(inner) => write!(f, "{MAP_PREFIX}{inner}; }}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl FromStr for Descriptor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Descriptor {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_ignore_case() {
        assert_eq!(
            Descriptor::parse("string"),
            Descriptor::Primitive(Primitive::String)
        );
        assert_eq!(
            Descriptor::parse("Number"),
            Descriptor::Primitive(Primitive::Number)
        );
        assert_eq!(
            Descriptor::parse("ANY"),
            Descriptor::Primitive(Primitive::Any)
        );
    }

    #[test]
    fn test_date_is_case_sensitive() {
        assert_eq!(Descriptor::parse("Date"), Descriptor::Date);
        assert_eq!(Descriptor::parse("date"), Descriptor::named("date"));
    }

    #[test]
    fn test_wrappers_strip_in_order() {
        assert_eq!(
            Descriptor::parse("Array<Foo> | null"),
            Descriptor::nullable(Descriptor::array(Descriptor::named("Foo")))
        );
        assert_eq!(
            Descriptor::parse("Array<Foo | null>"),
            Descriptor::array(Descriptor::nullable(Descriptor::named("Foo")))
        );
        assert_eq!(
            Descriptor::parse("Date | null | undefined"),
            Descriptor::optional(Descriptor::nullable(Descriptor::Date))
        );
    }

    #[test]
    fn test_map_accepts_both_terminators() {
        let expected = Descriptor::map(Descriptor::named("Foo"));
        assert_eq!(Descriptor::parse("{ [key: string]: Foo; }"), expected);
        assert_eq!(Descriptor::parse("{ [key: string]: Foo }"), expected);
    }

    #[test]
    fn test_unclosed_array_is_a_name() {
        assert_eq!(
            Descriptor::parse("Array<Foo"),
            Descriptor::named("Array<Foo")
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let text = "{ [key: string]: Array<PaymentSubject | null>; } | undefined";
        assert_eq!(Descriptor::parse(text).to_string(), text);
    }

    #[test]
    fn test_innermost_name() {
        let descriptor = Descriptor::parse("Array<{ [key: string]: Sale; }> | null");
        assert_eq!(descriptor.innermost_name(), Some("Sale"));
        assert_eq!(Descriptor::parse("Array<string>").innermost_name(), None);
    }
}
