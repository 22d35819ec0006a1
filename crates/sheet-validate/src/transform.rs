//! Raw value to typed value conversion.

use sheet_model::{Diagnostics, FieldKind, FieldSpec, FieldValue};

use crate::fs::FileSystem;

/// One-based entry number shown in messages for a zero-based ordinal.
pub(crate) fn entry_number(ordinal: usize) -> usize {
    ordinal + 1
}

/// Convert one raw value according to its field definition.
///
/// An empty value is replaced by the field default; if there is none the
/// result is [`FieldValue::Missing`]. Conversion problems are recorded in
/// `diagnostics` and never abort: integers and booleans that fail to parse
/// become `Missing`, and paths that do not exist are still returned.
pub fn transform_field<F>(
    field: &FieldSpec,
    raw: &str,
    ordinal: usize,
    fs: &F,
    diagnostics: &mut Diagnostics,
) -> FieldValue
where
    F: FileSystem + ?Sized,
{
    let value = if raw.is_empty() {
        match field.default.as_deref() {
            Some(default) if !default.is_empty() => default,
            _ => return FieldValue::Missing,
        }
    } else {
        raw
    };
    let entry = entry_number(ordinal);

    match field.kind {
        FieldKind::String => FieldValue::Text(value.to_string()),
        FieldKind::FilePath | FieldKind::DirectoryPath => {
            let path = fs.resolve(value);
            if !fs.exists(&path) {
                let noun = if field.kind == FieldKind::FilePath {
                    "file"
                } else {
                    "directory"
                };
                diagnostics.error(format!(
                    "Entry {entry}: The '{}' {noun} does not exist: {}",
                    field.name,
                    path.display()
                ));
            }
            FieldValue::Path(path)
        }
        FieldKind::Integer => match value.parse::<i64>() {
            Ok(number) => FieldValue::Integer(number),
            Err(_) => {
                diagnostics.error(format!(
                    "Entry {entry}: The '{}' value ({value}) is not a valid integer",
                    field.name
                ));
                FieldValue::Missing
            }
        },
        FieldKind::Boolean => {
            if value.eq_ignore_ascii_case("true") {
                FieldValue::Boolean(true)
            } else if value.eq_ignore_ascii_case("false") {
                FieldValue::Boolean(false)
            } else {
                diagnostics.error(format!(
                    "Entry {entry}: The '{}' value ({value}) is not a valid boolean, \
                     expected true or false",
                    field.name
                ));
                FieldValue::Missing
            }
        }
    }
}
