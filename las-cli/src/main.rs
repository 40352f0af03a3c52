//! LAS CLI - Command line interface
//!
//! Parses one LAS file and prints the document as JSON, or a short summary.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use las_config::{LasConfig, LogLevel};
use las_core::Document;
use tracing::{debug, info};

mod config;
mod error;
mod logging;
mod platform;

use crate::error::CliError;
use crate::logging::LogFormat;
use crate::platform::{decode_source, print_error_with_source, print_summary};

#[derive(Parser)]
#[command(
    name = "las",
    about = "Parse a LAS 2.0 well-log file",
    version
)]
struct Cli {
    /// LAS file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Global log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = config::parse_log_level)]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Print version, wrap mode, sections and row count instead of JSON
    #[arg(long)]
    summary: bool,

    /// Use curve mnemonics as log column headers
    #[arg(long)]
    curve_headers: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    config::apply_log_level(&mut config, cli.log_level);
    logging::init(&config.log, cli.log_format);

    let source = match read_source(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    match run(&cli, &config, &source) {
        Ok(()) => {}
        Err(CliError::Parse(e)) => {
            print_error_with_source(&e, &decode_source(&source));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// 读取原始字节；非法 UTF-8 交给字符流处理
fn read_source(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli, config: &LasConfig, source: &[u8]) -> Result<(), CliError> {
    info!(target: "las::cli", file = %cli.file.display(), "Parsing");

    let mut document: Document = las_core::parse_with_config(source, config)?;
    if cli.curve_headers {
        document = document.with_curve_headers();
    }
    debug!(
        target: "las::cli",
        sections = document.sections().len(),
        rows = document.logs().len(),
        "Parsed"
    );

    if cli.summary {
        print_summary(&document);
    } else {
        println!("{}", serde_json::to_string_pretty(&document)?);
    }
    Ok(())
}
