//! Document format detection.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use sheet_model::{Diagnostics, DocumentFormat};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Format used when the first line does not decide between CSV and TSV.
pub const FORMAT_INFERENCE_FALLBACK: DocumentFormat = DocumentFormat::Tsv;

/// Determine the document format, recording an error when it cannot be derived.
///
/// A recognized extension (`csv`, `tsv`, `yml`, `yaml`) wins. Otherwise the
/// first line decides: more commas than tabs is CSV, more tabs than commas is
/// TSV. When the counts are equal an error is recorded and
/// [`FORMAT_INFERENCE_FALLBACK`] is returned so the run can still produce a
/// complete report.
pub fn sniff_format(path: &Path, diagnostics: &mut Diagnostics) -> Result<DocumentFormat> {
    if let Some(format) = infer_format(path)? {
        return Ok(format);
    }
    diagnostics.error(format!(
        "Cannot derive file type of {}: the first line contains as many commas as tabs. \
         Use a csv, tsv, yml or yaml extension",
        path.display()
    ));
    Ok(FORMAT_INFERENCE_FALLBACK)
}

/// Determine the document format, or `None` when it cannot be derived.
pub fn infer_format(path: &Path) -> Result<Option<DocumentFormat>> {
    if let Some(format) = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
    {
        debug!(path = %path.display(), %format, "format from extension");
        return Ok(Some(format));
    }

    let line = read_first_line(path)?;
    let commas = line.matches(',').count();
    let tabs = line.matches('\t').count();
    let format = format_from_counts(commas, tabs);
    debug!(
        path = %path.display(),
        commas,
        tabs,
        format = format.map(DocumentFormat::as_str),
        "format from first line"
    );
    Ok(format)
}

fn format_from_counts(commas: usize, tabs: usize) -> Option<DocumentFormat> {
    match commas.cmp(&tabs) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Greater => Some(DocumentFormat::Csv),
        std::cmp::Ordering::Less => Some(DocumentFormat::Tsv),
    }
}

fn read_first_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| IngestError::io(path, e))?;
    // Skip BOM if present
    Ok(line.strip_prefix('\u{feff}').unwrap_or(&line).to_string())
}
