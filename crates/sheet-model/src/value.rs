//! Typed conversion output.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::Value;

/// A converted field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Path(PathBuf),
    /// Empty without a default, or a value that failed coercion.
    Missing,
}

impl FieldValue {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Integer(number) => Value::from(*number),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Path(path) => Value::String(path.to_string_lossy().into_owned()),
            Self::Missing => Value::Null,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Integer(number) => serializer.serialize_i64(*number),
            Self::Boolean(flag) => serializer.serialize_bool(*flag),
            Self::Path(path) => serializer.serialize_str(&path.to_string_lossy()),
            Self::Missing => serializer.serialize_none(),
        }
    }
}

/// One converted record.
///
/// `meta` holds every field that declares `meta` names, keyed by those names.
/// `values` holds every other field in schema order. Concatenated, the record
/// reads `[meta, value1, value2, ...]`, which is also its serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRecord {
    pub meta: BTreeMap<String, FieldValue>,
    pub values: Vec<FieldValue>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `[meta, value1, value2, ...]` shape as JSON values.
    pub fn into_positional(self) -> Vec<Value> {
        let meta: serde_json::Map<String, Value> = self
            .meta
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        let mut out = Vec::with_capacity(self.values.len() + 1);
        out.push(Value::Object(meta));
        out.extend(self.values.iter().map(FieldValue::to_json));
        out
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len() + 1))?;
        seq.serialize_element(&self.meta)?;
        for value in &self.values {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
