//! Samplesheet converter CLI.

use clap::{ColorChoice, Parser};
use sheet_cli::logging::{LogConfig, LogFormat, init_logging};
use sheet_cli::report::{records_json, records_table, schema_table, totals_table};
use sheet_model::Schema;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, ConvertArgs, LogFormatArg, LogLevelArg, OutputArg};
use crate::commands::{ConvertOutcome, run_convert, run_schema};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Convert(args) => match run_convert(args) {
            Ok(outcome) => print_outcome(args, outcome),
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Schema(args) => match run_schema(args) {
            Ok(schema) => {
                print_schema(&schema);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn print_outcome(args: &ConvertArgs, outcome: ConvertOutcome) -> i32 {
    match outcome {
        ConvertOutcome::Converted { schema, records } => {
            match args.output {
                OutputArg::Json => match records_json(&records) {
                    Ok(json) => println!("{json}"),
                    Err(error) => {
                        eprintln!("error: failed to serialize records: {error}");
                        return 1;
                    }
                },
                OutputArg::Summary => {
                    println!("Document: {}", args.document.display());
                    println!("Schema: {}", args.schema.display());
                    println!("{}", records_table(&schema, &records));
                    println!("{}", totals_table(records.len(), 0, 0));
                }
            }
            0
        }
        ConvertOutcome::Invalid(failure) => {
            if args.output == OutputArg::Summary {
                println!("Document: {}", args.document.display());
                println!(
                    "{}",
                    totals_table(0, failure.errors().len(), failure.warnings().len())
                );
            }
            eprintln!("Errors:");
            for error in failure.errors() {
                eprintln!("- {error}");
            }
            if !failure.warnings().is_empty() {
                eprintln!("Warnings:");
                for warning in failure.warnings() {
                    eprintln!("- {warning}");
                }
            }
            1
        }
    }
}

fn print_schema(schema: &Schema) {
    println!("{}", schema_table(schema));
    if !schema.issues().is_empty() {
        eprintln!("Schema issues:");
        for issue in schema.issues() {
            eprintln!("- {issue}");
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
