use anyhow::{Context, Result};
use sheet_ingest::load_schema;
use sheet_model::{OutputRecord, Schema};
use sheet_validate::{ConvertError, ConvertOptions, Converter, ValidationFailure};
use tracing::{debug, info_span};

use crate::cli::{ConvertArgs, SchemaArgs};

pub enum ConvertOutcome {
    Converted {
        schema: Schema,
        records: Vec<OutputRecord>,
    },
    Invalid(ValidationFailure),
}

pub fn convert_options(args: &ConvertArgs) -> ConvertOptions {
    let mut options =
        ConvertOptions::new().with_strict_format_inference(args.strict_format);
    if let Some(format) = args.format {
        options = options.with_format(format.into());
    }
    if let Some(base_dir) = &args.base_dir {
        options = options.with_base_dir(base_dir);
    }
    options
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertOutcome> {
    let span = info_span!("sheetconv", document = %args.document.display());
    let _guard = span.enter();

    let options = convert_options(args);
    debug!(?options, "conversion options");
    let schema = load_schema(&args.schema).context("load schema")?;
    let converter = Converter::new(options);
    match converter.convert_document(&args.document, &schema) {
        Ok(records) => Ok(ConvertOutcome::Converted { schema, records }),
        Err(ConvertError::ValidationFailed(failure)) => Ok(ConvertOutcome::Invalid(failure)),
        Err(error) => Err(error).with_context(|| format!("convert {}", args.document.display())),
    }
}

pub fn run_schema(args: &SchemaArgs) -> Result<Schema> {
    load_schema(&args.schema).context("load schema")
}
