//! Samplesheet schema model.
//!
//! Consumes a fixed subset of a JSON Schema document:
//!
//! - `properties`: ordered mapping of field name to field definition
//!   (`type`, `format`, `pattern`, `unique`, `meta`, `default`)
//! - `required`: list of field names
//! - `dependentRequired`: trigger field to list of dependent field names
//!
//! Unrecognized keys are ignored. The `type`×`format` combination of each
//! field is resolved once into a [`FieldKind`]; unsupported combinations are
//! kept as [`SchemaIssue`]s and the field falls back to a plain string.

use std::fmt;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

const SUPPORTED_TYPES: &str = "string, integer, boolean";
const SUPPORTED_FORMATS: &str = "file-path, directory-path";

/// Resolved value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Plain string, returned unchanged.
    String,
    /// String resolved to a filesystem path that must exist.
    FilePath,
    /// String resolved to a directory path that must exist.
    DirectoryPath,
    /// Base-10 signed integer.
    Integer,
    /// Case-insensitive `true` / `false`.
    Boolean,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::FilePath => "file-path",
            Self::DirectoryPath => "directory-path",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A problem with the schema itself, as opposed to the data it validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schema definition error for field '{}': {}",
            self.field, self.message
        )
    }
}

/// One schema property.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pattern: Option<Regex>,
    pattern_source: Option<String>,
    pub unique: bool,
    /// Metadata keys this field's value is written into. Empty means the
    /// value is emitted positionally.
    pub meta: Vec<String>,
    pub default: Option<String>,
}

impl FieldSpec {
    /// Plain string field with no constraints.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            pattern: None,
            pattern_source: None,
            unique: false,
            meta: Vec::new(),
            default: None,
        }
    }

    /// True when the value satisfies the field pattern. A field without a
    /// pattern matches anything.
    pub fn matches(&self, value: &str) -> bool {
        self.pattern
            .as_ref()
            .is_none_or(|pattern| pattern.is_match(value))
    }

    /// The pattern as written in the schema.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern_source.as_deref()
    }

    pub fn is_meta(&self) -> bool {
        !self.meta.is_empty()
    }
}

/// Parsed and indexed samplesheet schema.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    required: Vec<String>,
    dependent_required: Vec<(String, Vec<String>)>,
    issues: Vec<SchemaIssue>,
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    properties: Map<String, Value>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default, rename = "dependentRequired")]
    dependent_required: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawFieldSpec {
    #[serde(rename = "type")]
    ty: Option<Value>,
    format: Option<String>,
    pattern: Option<String>,
    #[serde(default)]
    unique: bool,
    meta: Option<MetaNames>,
    default: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetaNames {
    List(Vec<String>),
    Joined(String),
}

impl MetaNames {
    fn into_names(self) -> Vec<String> {
        let raw = match self {
            Self::List(names) => names,
            Self::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl Schema {
    /// Parse a schema from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a schema from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ModelError::invalid("top-level value must be an object"));
        }
        let raw: RawSchema = serde_json::from_value(value)?;

        let mut issues = Vec::new();
        let mut fields = Vec::with_capacity(raw.properties.len());
        for (name, definition) in raw.properties {
            if !definition.is_object() {
                return Err(ModelError::invalid(format!(
                    "property '{name}' must be an object"
                )));
            }
            let spec: RawFieldSpec = serde_json::from_value(definition).map_err(|e| {
                ModelError::invalid(format!("property '{name}': {e}"))
            })?;
            fields.push(build_field(name, spec, &mut issues));
        }

        let mut required: Vec<String> = Vec::with_capacity(raw.required.len());
        for name in raw.required {
            if !required.contains(&name) {
                required.push(name);
            }
        }

        let mut dependent_required = Vec::with_capacity(raw.dependent_required.len());
        for (trigger, dependents) in raw.dependent_required {
            let dependents: Vec<String> = serde_json::from_value(dependents).map_err(|e| {
                ModelError::invalid(format!("dependentRequired '{trigger}': {e}"))
            })?;
            dependent_required.push((trigger, dependents));
        }

        Ok(Self {
            fields,
            required,
            dependent_required,
            issues,
        })
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Required field names in declaration order.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|required| required == name)
    }

    /// `dependentRequired` rules as (trigger, dependents), in declaration order.
    pub fn dependent_required(&self) -> &[(String, Vec<String>)] {
        &self.dependent_required
    }

    /// Schema-definition problems found while loading.
    pub fn issues(&self) -> &[SchemaIssue] {
        &self.issues
    }

    /// Number of fields emitted positionally (fields without `meta`).
    pub fn positional_len(&self) -> usize {
        self.fields.iter().filter(|field| !field.is_meta()).count()
    }
}

fn build_field(name: String, raw: RawFieldSpec, issues: &mut Vec<SchemaIssue>) -> FieldSpec {
    let kind = resolve_kind(&name, raw.ty.as_ref(), raw.format.as_deref(), issues);

    let pattern_source = raw.pattern.filter(|pattern| !pattern.is_empty());
    let pattern = pattern_source.as_deref().and_then(|source| {
        match Regex::new(&format!("^(?:{source})$")) {
            Ok(regex) => Some(regex),
            Err(e) => {
                issues.push(SchemaIssue {
                    field: name.clone(),
                    message: format!("invalid pattern '{source}': {e}"),
                });
                None
            }
        }
    });

    FieldSpec {
        kind,
        pattern,
        pattern_source,
        unique: raw.unique,
        meta: raw.meta.map(MetaNames::into_names).unwrap_or_default(),
        default: raw.default.and_then(|value| scalar_to_string(&value)),
        name,
    }
}

fn resolve_kind(
    name: &str,
    ty: Option<&Value>,
    format: Option<&str>,
    issues: &mut Vec<SchemaIssue>,
) -> FieldKind {
    let declared = match ty {
        None => "string".to_string(),
        Some(Value::String(ty)) => ty.clone(),
        Some(other) => other.to_string(),
    };
    match declared.as_str() {
        "integer" => return FieldKind::Integer,
        "boolean" => return FieldKind::Boolean,
        "string" => {}
        _ => issues.push(SchemaIssue {
            field: name.to_string(),
            message: format!("unsupported type {declared} (expected one of {SUPPORTED_TYPES})"),
        }),
    }
    match format {
        None | Some("") => FieldKind::String,
        Some("file-path") => FieldKind::FilePath,
        Some("directory-path") => FieldKind::DirectoryPath,
        Some(other) => {
            issues.push(SchemaIssue {
                field: name.to_string(),
                message: format!(
                    "unsupported string format '{other}' (expected one of {SUPPORTED_FORMATS})"
                ),
            });
            FieldKind::String
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
