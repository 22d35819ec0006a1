//! Conversion orchestration.

use std::path::Path;
use std::time::Instant;

use sheet_ingest::{IngestError, infer_format, load_records, load_schema, sniff_format};
use sheet_model::{Diagnostics, DocumentFormat, OutputRecord, RawRecord, Schema};
use tracing::{debug, info, info_span};

use crate::error::{ConvertError, Result, ValidationFailure};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::options::ConvertOptions;
use crate::row::RowValidator;
use crate::unique::UniquenessTracker;

/// Converts samplesheets into typed records.
///
/// Each call to [`Converter::convert`] owns its diagnostics and uniqueness
/// state, so one converter can be reused for any number of documents.
#[derive(Debug, Clone)]
pub struct Converter<F = LocalFileSystem> {
    fs: F,
    options: ConvertOptions,
}

impl Converter<LocalFileSystem> {
    /// Converter backed by the local filesystem, rooted at `options.base_dir`.
    pub fn new(options: ConvertOptions) -> Self {
        let fs = LocalFileSystem::new(options.base_dir.clone());
        Self { fs, options }
    }
}

impl Default for Converter<LocalFileSystem> {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl<F: FileSystem> Converter<F> {
    pub fn with_file_system(fs: F, options: ConvertOptions) -> Self {
        Self { fs, options }
    }

    /// Validate and convert a samplesheet against a JSON schema.
    ///
    /// Returns one [`OutputRecord`] per input record, in input order. Read and
    /// parse failures abort immediately; every other problem is collected and
    /// returned together as [`ConvertError::ValidationFailed`] once all
    /// records have been processed.
    pub fn convert(&self, document: &Path, schema: &Path) -> Result<Vec<OutputRecord>> {
        let span = info_span!(
            "convert",
            document = %document.display(),
            schema = %schema.display()
        );
        let _guard = span.enter();

        let schema = load_schema(schema)?;
        self.convert_document(document, &schema)
    }

    /// Validate and convert a samplesheet against an already loaded schema.
    pub fn convert_document(
        &self,
        document: &Path,
        schema: &Schema,
    ) -> Result<Vec<OutputRecord>> {
        let start = Instant::now();
        let mut diagnostics = Diagnostics::new();
        let format = self.resolve_format(document, &mut diagnostics)?;
        let records = load_records(document, format)?;

        let output = self.run(schema, &records, &mut diagnostics);
        info!(
            %format,
            records = output.len(),
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            duration_ms = start.elapsed().as_millis(),
            "conversion complete"
        );
        finish(output, diagnostics)
    }

    /// Validate and convert records that are already in memory.
    pub fn convert_records(
        &self,
        schema: &Schema,
        records: &[RawRecord],
    ) -> Result<Vec<OutputRecord>> {
        let mut diagnostics = Diagnostics::new();
        let output = self.run(schema, records, &mut diagnostics);
        finish(output, diagnostics)
    }

    fn resolve_format(
        &self,
        document: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Result<DocumentFormat> {
        if let Some(format) = self.options.format {
            debug!(%format, "format from options");
            return Ok(format);
        }
        if self.options.strict_format_inference {
            return infer_format(document)?.ok_or_else(|| {
                ConvertError::Ingest(IngestError::UndecidableFormat {
                    path: document.to_path_buf(),
                })
            });
        }
        Ok(sniff_format(document, diagnostics)?)
    }

    fn run(
        &self,
        schema: &Schema,
        records: &[RawRecord],
        diagnostics: &mut Diagnostics,
    ) -> Vec<OutputRecord> {
        for issue in schema.issues() {
            diagnostics.error(issue.to_string());
        }

        let validator = RowValidator::new(schema, &self.fs);
        let mut tracker = UniquenessTracker::new();
        records
            .iter()
            .enumerate()
            .map(|(ordinal, record)| validator.validate(record, ordinal, &mut tracker, diagnostics))
            .collect()
    }
}

fn finish(output: Vec<OutputRecord>, diagnostics: Diagnostics) -> Result<Vec<OutputRecord>> {
    if !diagnostics.has_errors() {
        return Ok(output);
    }
    let (errors, warnings) = diagnostics.into_parts();
    Err(ConvertError::ValidationFailed(ValidationFailure::new(
        errors, warnings,
    )))
}

/// Convert a samplesheet with default options and the local filesystem.
pub fn convert(document: &Path, schema: &Path) -> Result<Vec<OutputRecord>> {
    Converter::default().convert(document, schema)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;
    use sheet_model::FieldValue;

    use super::*;

    struct AllExist;

    impl FileSystem for AllExist {
        fn resolve(&self, raw: &str) -> PathBuf {
            PathBuf::from(raw)
        }

        fn exists(&self, _path: &Path) -> bool {
            true
        }
    }

    fn converter() -> Converter<AllExist> {
        Converter::with_file_system(AllExist, ConvertOptions::default())
    }

    #[test]
    fn in_memory_records_convert() {
        let schema = Schema::from_value(json!({
            "properties": {
                "sample": {"type": "string", "meta": "id"},
                "reads": {"type": "string", "format": "file-path"}
            },
            "required": ["sample"]
        }))
        .unwrap();
        let records: Vec<RawRecord> = vec![
            [("sample", "S1"), ("reads", "a.fq")].into_iter().collect(),
            [("sample", "S2"), ("reads", "b.fq")].into_iter().collect(),
        ];

        let output = converter().convert_records(&schema, &records).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output[1].meta["id"], FieldValue::Text("S2".to_string()));
        assert_eq!(output[1].values, vec![FieldValue::Path(PathBuf::from("b.fq"))]);
    }

    #[test]
    fn schema_issues_are_reported_once_per_run() {
        let schema = Schema::from_value(json!({
            "properties": {"count": {"type": "number"}}
        }))
        .unwrap();
        let records: Vec<RawRecord> = vec![
            [("count", "1")].into_iter().collect(),
            [("count", "2")].into_iter().collect(),
        ];

        let error = converter().convert_records(&schema, &records).unwrap_err();
        let failure = error.validation().unwrap();
        assert_eq!(failure.errors().len(), 1);
        assert!(failure.errors()[0].starts_with("Schema definition error for field 'count'"));
    }

    #[test]
    fn empty_input_converts_to_nothing() {
        let schema = Schema::default();
        assert!(converter().convert_records(&schema, &[]).unwrap().is_empty());
    }
}
