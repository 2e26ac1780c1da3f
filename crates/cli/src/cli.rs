//! Command line arguments

use clap::Parser;
use loader::ContentFormat;
use std::path::PathBuf;

/// Load an env file, validate it against a schema and print the result as JSON
#[derive(Parser, Debug, Clone)]
#[command(name = "envload", version, about)]
pub struct Cli {
    /// Path to the env file, or path segments joined in order
    #[arg(required = true, value_name = "SEGMENT")]
    pub location: Vec<PathBuf>,

    /// Schema description file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub schema: PathBuf,

    /// Content format of the env file; detected from the extension if omitted
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ContentFormat>,

    /// Log load failures before exiting
    #[arg(short, long)]
    pub debug: bool,

    /// Pretty-print the validated object
    #[arg(long)]
    pub pretty: bool,

    /// Log level filter (overrides ENVLOAD_LOG_LEVEL)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log format: pretty or json (overrides ENVLOAD_LOG_FORMAT)
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<String>,
}
