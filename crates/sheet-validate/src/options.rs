//! Conversion options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sheet_model::DocumentFormat;

/// Options for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Document format. When unset it is taken from the extension or sniffed.
    pub format: Option<DocumentFormat>,

    /// Treat an undecidable format as fatal instead of falling back to TSV.
    pub strict_format_inference: bool,

    /// Root for relative `file-path` and `directory-path` values.
    pub base_dir: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_strict_format_inference(mut self, strict: bool) -> Self {
        self.strict_format_inference = strict;
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }
}
