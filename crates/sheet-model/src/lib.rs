//! Samplesheet data model.
//!
//! Types shared by the ingest and validation crates:
//!
//! - [`Schema`] and [`FieldSpec`]: the parsed field-definition document,
//!   with each field's `type`×`format` combination resolved once into a
//!   [`FieldKind`].
//! - [`RawRecord`]: one row (or YAML mapping) of untyped string values.
//! - [`FieldValue`] and [`OutputRecord`]: the typed result of a conversion.
//! - [`Diagnostics`]: the per-run error and warning accumulator.

pub mod diagnostics;
pub mod error;
pub mod format;
pub mod record;
pub mod schema;
pub mod value;

pub use diagnostics::Diagnostics;
pub use error::{ModelError, Result};
pub use format::DocumentFormat;
pub use record::RawRecord;
pub use schema::{FieldKind, FieldSpec, Schema, SchemaIssue};
pub use value::{FieldValue, OutputRecord};
