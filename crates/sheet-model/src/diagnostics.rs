//! Run-scoped collection of error and warning messages.

use tracing::{debug, warn};

/// Errors and warnings collected during one conversion run.
///
/// Every component of a run appends to the same instance; nothing is
/// reported until the whole document has been processed. A new instance is
/// created per run, so concurrent conversions never share one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "recorded error");
        self.errors.push(message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "recorded warning");
        self.warnings.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Warnings in the order they were recorded.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the accumulator, returning (errors, warnings).
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.warnings)
    }
}
