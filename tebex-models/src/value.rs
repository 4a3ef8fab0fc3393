//! Domain-side values produced and consumed by the wire codec

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};

/// A value on the domain side of the codec.
///
/// Objects keep their keys in insertion order. After deserialization the keys
/// of a registered composite are its local field names, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Model>),
    Object(Vec<(String, Model)>),
}

impl Model {
    /// Build an object from key/value pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Model)>,
    {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Structural conversion from JSON; strings stay strings.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from_json).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Structural conversion to JSON; dates render as ISO-8601 strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Date(date) => Value::String(format_date(date)),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Look up an object member
    pub fn get(&self, key: &str) -> Option<&Model> {
        match self {
            Self::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Model {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Model {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Model {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Model {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<Vec<Model>> for Model {
    fn from(items: Vec<Model>) -> Self {
        Self::Array(items)
    }
}

/// Render a timestamp the way the API expects: millisecond precision, `Z`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a wire timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) and bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_json_conversion_keeps_key_order() {
        let wire = json!({"zeta": 1, "alpha": [true, null], "mid": {"b": "x", "a": "y"}});
        let model = Model::from_json(wire.clone());

        match &model {
            Model::Object(entries) => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, ["zeta", "alpha", "mid"]);
            }
            other => panic!("expected object, got {other:?}"),
        }
        assert_eq!(model.to_json(), wire);
    }

    #[test]
    fn test_date_renders_with_millis() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        assert_eq!(Model::Date(date).to_json(), json!("2024-01-01T12:30:00.000Z"));
    }

    #[test]
    fn test_parse_date_formats() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(parse_date("2024-01-01T12:00:00Z"), Some(noon));
        assert_eq!(parse_date("2024-01-01T13:00:00+01:00"), Some(noon));
        assert_eq!(parse_date("2024-01-01 12:00:00"), Some(noon));
        assert_eq!(
            parse_date("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_get_member() {
        let model = Model::object([("id", Model::from(7)), ("name", Model::from("vip"))]);
        assert_eq!(model.get("name").and_then(Model::as_str), Some("vip"));
        assert!(model.get("missing").is_none());
        assert!(Model::Null.get("id").is_none());
    }
}
