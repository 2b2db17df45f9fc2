//! Dynamic cell values and row payloads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamic value held by a table cell.
///
/// Comparison, filtering and rendering all operate over this type; column
/// type definitions transform it (e.g. parsing a string into a number or a
/// timestamp) before the generic comparator runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Numeric view of the value, when it has one. Timestamps count.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::DateTime(dt) => Some(dt.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Stringification used wherever a value is displayed or pattern-matched.
    /// `Null` is the empty string; booleans are `"true"`/`"false"`.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::DateTime(dt) => dt.to_rfc3339(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            // Nested structures flatten to their JSON text.
            other => Value::String(other.to_string()),
        }
    }
}

/// A structured data row: an ordered field map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// One raw data row: either a plain array of field strings, or a structured
/// record addressed by column definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowData {
    Fields(Vec<String>),
    Record(Record),
}

impl RowData {
    pub fn fields(items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        RowData::Fields(items.into_iter().map(Into::into).collect())
    }

    pub fn record(record: Record) -> Self {
        RowData::Record(record)
    }

    pub fn is_fields(&self) -> bool {
        matches!(self, RowData::Fields(_))
    }

    /// Number of positional fields; records report their field count.
    pub fn len(&self) -> usize {
        match self {
            RowData::Fields(f) => f.len(),
            RowData::Record(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positional field value (array mode only).
    pub fn position(&self, index: usize) -> Option<Value> {
        match self {
            RowData::Fields(f) => f.get(index).map(|s| Value::String(s.clone())),
            RowData::Record(_) => None,
        }
    }

    /// Keyed field value (record mode only).
    pub fn field_value(&self, key: &str) -> Option<Value> {
        match self {
            RowData::Fields(_) => None,
            RowData::Record(r) => r.get(key).cloned(),
        }
    }
}

impl From<serde_json::Value> for RowData {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Array(items) => RowData::Fields(
                items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s,
                        other => Value::from(other).display(),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(map) => RowData::Record(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            other => RowData::Fields(vec![Value::from(other).display()]),
        }
    }
}

/// Convert a JSON array into data rows, one per element.
pub fn rows_from_json(json: serde_json::Value) -> Vec<RowData> {
    match json {
        serde_json::Value::Array(items) => items.into_iter().map(RowData::from).collect(),
        other => vec![RowData::from(other)],
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Record, RowData, Value, rows_from_json};

    #[test]
    fn test_value_from_json_scalars() {
        assert_eq!(Value::from(json!(null)), Value::Null);
        assert_eq!(Value::from(json!(true)), Value::Bool(true));
        assert_eq!(Value::from(json!(42)), Value::Int(42));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!("hi")), Value::String("hi".to_string()));
    }

    #[test]
    fn test_display_contract() {
        assert_eq!(Value::Null.display(), "");
        assert_eq!(Value::Bool(true).display(), "true");
        assert_eq!(Value::Int(7).display(), "7");
    }

    #[test]
    fn test_rows_from_json_mixed_modes() {
        let rows = rows_from_json(json!([
            ["a", "b"],
            {"name": "ada", "age": 36},
        ]));
        assert_eq!(rows[0], RowData::fields(["a", "b"]));
        assert_eq!(
            rows[1],
            RowData::record(Record::new().field("name", "ada").field("age", 36))
        );
    }

    #[test]
    fn test_json_array_items_stringify() {
        let rows = rows_from_json(json!([[1, true, null]]));
        assert_eq!(rows[0], RowData::fields(["1", "true", ""]));
    }
}
