//! Error types for samplesheet ingestion.
//!
//! Everything here is fatal: a document that cannot be read or parsed leaves
//! nothing to validate row by row.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Samplesheet Parsing Errors ===
    /// Malformed delimited text.
    #[error("failed to parse delimited file {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The same column name appears twice in the header row.
    #[error("duplicate column '{header}' in header of {path}")]
    DuplicateHeader { path: PathBuf, header: String },

    /// Malformed YAML.
    #[error("failed to parse YAML file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Parsed document does not have the expected list-of-records shape.
    #[error("unexpected document structure in {path}: {reason}")]
    DocumentShape { path: PathBuf, reason: String },

    /// Neither the extension nor the first line identify the format.
    #[error("cannot derive file type of {path}: use a csv, tsv, yml or yaml extension")]
    UndecidableFormat { path: PathBuf },

    // === Schema Errors ===
    /// Schema file is not a usable schema document.
    #[error("failed to load schema {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: sheet_model::ModelError,
    },
}

impl IngestError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub(crate) fn shape(path: &Path, reason: impl Into<String>) -> Self {
        Self::DocumentShape {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_file_not_found() {
        let err = IngestError::io(
            Path::new("/path/to/sheet.csv"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, IngestError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "file not found: /path/to/sheet.csv");
    }

    #[test]
    fn other_io_errors_keep_source() {
        let err = IngestError::io(
            Path::new("sheet.csv"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, IngestError::FileRead { .. }));
    }
}
