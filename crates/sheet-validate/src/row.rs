//! Per-record validation.

use sheet_model::{Diagnostics, OutputRecord, RawRecord, Schema};

use crate::fs::FileSystem;
use crate::transform::{entry_number, transform_field};
use crate::unique::UniquenessTracker;

/// Validates records against a schema and converts them to [`OutputRecord`]s.
///
/// Checks, in order:
///
/// 1. Structure: fields not in the schema, and required fields absent from
///    the record. Each kind is reported once per record with the full list.
/// 2. `dependentRequired`: one error per rule listing every blank dependent.
/// 3. Per field in schema order: required value, pattern, uniqueness.
///
/// Every field is converted regardless of the outcome of its checks, so an
/// output record is always produced.
#[derive(Debug)]
pub struct RowValidator<'a, F: ?Sized> {
    schema: &'a Schema,
    fs: &'a F,
}

impl<'a, F> RowValidator<'a, F>
where
    F: FileSystem + ?Sized,
{
    pub fn new(schema: &'a Schema, fs: &'a F) -> Self {
        Self { schema, fs }
    }

    pub fn validate(
        &self,
        record: &RawRecord,
        ordinal: usize,
        tracker: &mut UniquenessTracker,
        diagnostics: &mut Diagnostics,
    ) -> OutputRecord {
        self.check_structure(record, ordinal, diagnostics);
        self.check_dependent_required(record, ordinal, diagnostics);
        self.check_and_convert_fields(record, ordinal, tracker, diagnostics)
    }

    fn check_structure(&self, record: &RawRecord, ordinal: usize, diagnostics: &mut Diagnostics) {
        let entry = entry_number(ordinal);

        let unexpected: Vec<&str> = record
            .field_names()
            .filter(|name| !self.schema.contains(name))
            .collect();
        if !unexpected.is_empty() {
            diagnostics.error(format!(
                "Entry {entry}: Found unexpected field(s) not defined in the schema: {}",
                quoted(&unexpected)
            ));
        }

        let missing: Vec<&str> = self
            .schema
            .required()
            .iter()
            .map(String::as_str)
            .filter(|name| !record.contains(name))
            .collect();
        if !missing.is_empty() {
            diagnostics.error(format!(
                "Entry {entry}: Missing required field(s): {}",
                quoted(&missing)
            ));
        }
    }

    fn check_dependent_required(
        &self,
        record: &RawRecord,
        ordinal: usize,
        diagnostics: &mut Diagnostics,
    ) {
        let entry = entry_number(ordinal);
        for (trigger, dependents) in self.schema.dependent_required() {
            if record.is_blank(trigger) {
                continue;
            }
            let missing: Vec<&str> = dependents
                .iter()
                .map(String::as_str)
                .filter(|name| record.is_blank(name))
                .collect();
            if !missing.is_empty() {
                diagnostics.error(format!(
                    "Entry {entry}: Missing value(s) for {} (required when '{trigger}' is set)",
                    missing.join(", ")
                ));
            }
        }
    }

    fn check_and_convert_fields(
        &self,
        record: &RawRecord,
        ordinal: usize,
        tracker: &mut UniquenessTracker,
        diagnostics: &mut Diagnostics,
    ) -> OutputRecord {
        let entry = entry_number(ordinal);
        let mut output = OutputRecord {
            values: Vec::with_capacity(self.schema.positional_len()),
            ..OutputRecord::default()
        };

        for field in self.schema.fields() {
            let raw = record.value(&field.name);

            if raw.is_empty() && self.schema.is_required(&field.name) {
                diagnostics.error(format!(
                    "Entry {entry}: Missing required value: {}",
                    field.name
                ));
            } else if !raw.is_empty() && !field.matches(raw) {
                diagnostics.error(format!(
                    "Entry {entry}: The '{}' value ({raw}) does not match the pattern '{}'",
                    field.name,
                    field.pattern().unwrap_or_default()
                ));
            } else if field.unique && tracker.observe(&field.name, raw) {
                diagnostics.error(format!(
                    "Entry {entry}: The '{}' value ({raw}) needs to be unique across all entries",
                    field.name
                ));
            }

            let value = transform_field(field, raw, ordinal, self.fs, diagnostics);
            if field.is_meta() {
                for key in &field.meta {
                    output.meta.insert(key.clone(), value.clone());
                }
            } else {
                output.values.push(value);
            }
        }

        output
    }
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use serde_json::json;
    use sheet_model::FieldValue;

    use super::*;

    struct NoFs;

    impl FileSystem for NoFs {
        fn resolve(&self, raw: &str) -> PathBuf {
            PathBuf::from(raw)
        }

        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    fn schema() -> Schema {
        Schema::from_value(json!({
            "properties": {
                "sample": {"type": "string", "pattern": "^\\S+$", "meta": "id", "unique": true},
                "fastq_1": {"type": "string", "format": "file-path"},
                "fastq_2": {"type": "string", "format": "file-path"},
                "replicate": {"type": "integer"},
                "group": {"meta": "group,condition"}
            },
            "required": ["sample", "fastq_1"],
            "dependentRequired": {"fastq_2": ["fastq_1", "replicate"]}
        }))
        .unwrap()
    }

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        fields.iter().copied().collect()
    }

    fn validate_one(record: &RawRecord) -> (OutputRecord, Diagnostics) {
        let schema = schema();
        let validator = RowValidator::new(&schema, &NoFs);
        let mut tracker = UniquenessTracker::new();
        let mut diagnostics = Diagnostics::new();
        let output = validator.validate(record, 0, &mut tracker, &mut diagnostics);
        (output, diagnostics)
    }

    #[test]
    fn valid_record_converts() {
        let (output, diagnostics) = validate_one(&record(&[
            ("sample", "S1"),
            ("fastq_1", "a.fq.gz"),
            ("fastq_2", "b.fq.gz"),
            ("replicate", "2"),
            ("group", "ctrl"),
        ]));
        assert!(!diagnostics.has_errors(), "{:?}", diagnostics.errors());
        assert_eq!(output.meta.len(), 3);
        assert_eq!(output.meta["id"], FieldValue::Text("S1".to_string()));
        assert_eq!(output.meta["group"], FieldValue::Text("ctrl".to_string()));
        assert_eq!(output.meta["condition"], FieldValue::Text("ctrl".to_string()));
        assert_eq!(
            output.values,
            vec![
                FieldValue::Path(PathBuf::from("a.fq.gz")),
                FieldValue::Path(PathBuf::from("b.fq.gz")),
                FieldValue::Integer(2),
            ]
        );
    }

    #[test]
    fn unexpected_fields_are_reported_once() {
        let (_, diagnostics) = validate_one(&record(&[
            ("sample", "S1"),
            ("fastq_1", "a.fq.gz"),
            ("extra", "x"),
            ("other", "y"),
        ]));
        assert_eq!(
            diagnostics.errors(),
            &["Entry 1: Found unexpected field(s) not defined in the schema: 'extra', 'other'"
                .to_string()]
        );
    }

    #[test]
    fn empty_field_name_is_visible_in_message() {
        let (_, diagnostics) =
            validate_one(&record(&[("sample", "S1"), ("fastq_1", "a.fq.gz"), ("", "")]));
        assert_eq!(
            diagnostics.errors(),
            &["Entry 1: Found unexpected field(s) not defined in the schema: ''".to_string()]
        );
    }

    #[test]
    fn absent_required_field_reports_structure_and_value() {
        let (output, diagnostics) = validate_one(&record(&[("sample", "S1")]));
        assert_eq!(
            diagnostics.errors(),
            &[
                "Entry 1: Missing required field(s): 'fastq_1'".to_string(),
                "Entry 1: Missing required value: fastq_1".to_string(),
            ]
        );
        assert_eq!(output.values[0], FieldValue::Missing);
    }

    #[test]
    fn blank_required_value_reports_only_the_value() {
        let (_, diagnostics) = validate_one(&record(&[("sample", "S1"), ("fastq_1", "")]));
        assert_eq!(
            diagnostics.errors(),
            &["Entry 1: Missing required value: fastq_1".to_string()]
        );
    }

    #[test]
    fn dependent_required_lists_all_missing() {
        let (_, diagnostics) = validate_one(&record(&[
            ("sample", "S1"),
            ("fastq_1", "a.fq.gz"),
            ("fastq_2", "b.fq.gz"),
        ]));
        assert_eq!(
            diagnostics.errors(),
            &["Entry 1: Missing value(s) for replicate (required when 'fastq_2' is set)"
                .to_string()]
        );
    }

    #[test]
    fn blank_trigger_skips_dependent_required() {
        let (_, diagnostics) = validate_one(&record(&[
            ("sample", "S1"),
            ("fastq_1", "a.fq.gz"),
            ("fastq_2", ""),
        ]));
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn pattern_mismatch_is_reported() {
        let (output, diagnostics) =
            validate_one(&record(&[("sample", "S 1"), ("fastq_1", "a.fq.gz")]));
        assert_eq!(
            diagnostics.errors(),
            &["Entry 1: The 'sample' value (S 1) does not match the pattern '^\\S+$'".to_string()]
        );
        assert_eq!(output.meta["id"], FieldValue::Text("S 1".to_string()));
    }

    #[test]
    fn duplicates_are_reported_on_the_second_occurrence() {
        let schema = schema();
        let validator = RowValidator::new(&schema, &NoFs);
        let mut tracker = UniquenessTracker::new();
        let mut diagnostics = Diagnostics::new();
        let row = record(&[("sample", "S1"), ("fastq_1", "a.fq.gz")]);

        validator.validate(&row, 0, &mut tracker, &mut diagnostics);
        assert!(!diagnostics.has_errors());
        validator.validate(&row, 1, &mut tracker, &mut diagnostics);
        assert_eq!(
            diagnostics.errors(),
            &["Entry 2: The 'sample' value (S1) needs to be unique across all entries"
                .to_string()]
        );
    }

    #[test]
    fn positional_values_follow_schema_order() {
        let (output, _) = validate_one(&record(&[
            ("replicate", "1"),
            ("fastq_2", "b.fq.gz"),
            ("fastq_1", "a.fq.gz"),
            ("sample", "S1"),
        ]));
        assert_eq!(
            output.values,
            vec![
                FieldValue::Path(PathBuf::from("a.fq.gz")),
                FieldValue::Path(PathBuf::from("b.fq.gz")),
                FieldValue::Integer(1),
            ]
        );
        assert_eq!(output.meta["group"], FieldValue::Missing);
    }
}
