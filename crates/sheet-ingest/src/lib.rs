//! Samplesheet ingestion.
//!
//! Reads the two input documents of a conversion:
//!
//! - **Schema**: JSON field definitions, parsed into [`sheet_model::Schema`]
//! - **Samplesheet**: CSV, TSV or YAML, parsed into ordered [`sheet_model::RawRecord`]s
//!
//! The document format comes from the file extension when it is recognized
//! and is otherwise sniffed from the delimiters on the first line.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sheet_ingest::{load_records, load_schema, sniff_format};
//! use sheet_model::Diagnostics;
//!
//! let mut diagnostics = Diagnostics::new();
//! let schema = load_schema(Path::new("assets/schema_input.json"))?;
//! let format = sniff_format(Path::new("samplesheet.txt"), &mut diagnostics)?;
//! let records = load_records(Path::new("samplesheet.txt"), format)?;
//! ```

mod error;
mod records;
mod schema;
mod sniff;

pub use error::{IngestError, Result};
pub use records::{load_records, read_delimited, read_yaml};
pub use schema::load_schema;
pub use sniff::{FORMAT_INFERENCE_FALLBACK, infer_format, sniff_format};
