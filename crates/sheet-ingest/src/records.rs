//! Samplesheet record loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde_yaml::Value;
use sheet_model::{DocumentFormat, RawRecord};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Load every record of a samplesheet in document order.
pub fn load_records(path: &Path, format: DocumentFormat) -> Result<Vec<RawRecord>> {
    let records = match format.delimiter() {
        Some(delimiter) => read_delimited(path, delimiter)?,
        None => read_yaml(path)?,
    };
    debug!(
        path = %path.display(),
        %format,
        records = records.len(),
        "loaded samplesheet"
    );
    Ok(records)
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '\u{feff}' || c.is_whitespace())
        .to_string()
}

/// Read delimited text with a header row.
///
/// Cells are trimmed. Every row must have as many cells as the header.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();
    for (idx, header) in headers.iter().enumerate() {
        if headers[..idx].contains(header) {
            return Err(IngestError::DuplicateHeader {
                path: path.to_path_buf(),
                header: header.clone(),
            });
        }
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        let mut record = RawRecord::with_capacity(headers.len());
        for (header, value) in headers.iter().zip(row.iter()) {
            record.insert(header.as_str(), value);
        }
        records.push(record);
    }
    Ok(records)
}

/// Read a YAML sequence of mappings.
///
/// Scalar values are stringified so typing happens in one place downstream.
pub fn read_yaml(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let document: Value = serde_yaml::from_str(&text).map_err(|source| IngestError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = match document {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(entries) => entries,
        other => {
            return Err(IngestError::shape(
                path,
                format!("expected a list of records, found {}", value_kind(&other)),
            ));
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let entry_number = idx + 1;
        let mapping = match entry {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(IngestError::shape(
                    path,
                    format!(
                        "entry {entry_number} is a {}, expected a mapping",
                        value_kind(&other)
                    ),
                ));
            }
        };
        let mut record = RawRecord::with_capacity(mapping.len());
        for (key, value) in &mapping {
            let Some(name) = scalar_to_string(key) else {
                return Err(IngestError::shape(
                    path,
                    format!("entry {entry_number} has a non-scalar key"),
                ));
            };
            let Some(text) = scalar_to_string(value) else {
                return Err(IngestError::shape(
                    path,
                    format!(
                        "entry {entry_number} field '{name}' is a {}, expected a scalar",
                        value_kind(value)
                    ),
                ));
            };
            record.insert(name, text);
        }
        records.push(record);
    }
    Ok(records)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.trim().to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
