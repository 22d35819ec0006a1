//! CLI argument definitions for the samplesheet converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sheet_model::DocumentFormat;

#[derive(Parser)]
#[command(
    name = "sheetconv",
    version,
    about = "Validate samplesheets against a schema and convert them to typed records",
    long_about = "Validate CSV, TSV or YAML samplesheets against a JSON schema.\n\n\
                  Every problem in the document is reported at once. On success the\n\
                  converted records are printed as a table or as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a samplesheet and convert it to typed records.
    Convert(ConvertArgs),

    /// List the fields defined by a schema.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Samplesheet to convert (CSV, TSV or YAML).
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// JSON schema describing the samplesheet fields.
    #[arg(long = "schema", value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Document format (default: from the extension, else sniffed).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Fail when the format cannot be derived instead of assuming TSV.
    #[arg(long = "strict-format")]
    pub strict_format: bool,

    /// Directory that relative file and directory paths are resolved against.
    #[arg(long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// How converted records are printed.
    #[arg(long = "output", value_enum, default_value = "summary")]
    pub output: OutputArg,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// JSON schema to inspect.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
    #[value(alias = "yml")]
    Yaml,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Tsv => Self::Tsv,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Summary,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
