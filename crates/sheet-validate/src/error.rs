//! Conversion errors.

use sheet_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The schema or samplesheet could not be read at all.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// One or more records failed validation.
    #[error("{0}")]
    ValidationFailed(ValidationFailure),
}

impl ConvertError {
    /// The collected validation failure, if that is what this error is.
    pub fn validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::ValidationFailed(failure) => Some(failure),
            Self::Ingest(_) => None,
        }
    }
}

/// Every error recorded during a conversion, in the order they were found.
///
/// Displays as the messages joined by newlines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .errors.join("\n"))]
pub struct ValidationFailure {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { errors, warnings }
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
