//! Schema-driven samplesheet validation and conversion.
//!
//! A conversion loads a schema and a samplesheet, validates every record and
//! converts it into a typed [`OutputRecord`](sheet_model::OutputRecord).
//! Problems are collected for the whole document and reported together in a
//! single [`ValidationFailure`] instead of stopping at the first one.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use sheet_validate::{ConvertOptions, Converter};
//!
//! let converter = Converter::new(ConvertOptions::default());
//! match converter.convert(Path::new("samplesheet.csv"), Path::new("schema_input.json")) {
//!     Ok(records) => println!("{} records", records.len()),
//!     Err(error) => eprintln!("{error}"),
//! }
//! ```

mod converter;
mod error;
mod fs;
mod options;
mod row;
mod transform;
mod unique;

pub use converter::{Converter, convert};
pub use error::{ConvertError, Result, ValidationFailure};
pub use fs::{FileSystem, LocalFileSystem};
pub use options::ConvertOptions;
pub use row::RowValidator;
pub use transform::transform_field;
pub use unique::UniquenessTracker;
