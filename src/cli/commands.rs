//! CLI commands and argument parsing

use crate::decode::DecoderFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Infer and evolve warehouse table schemas from sample data
#[derive(Parser, Debug)]
#[command(name = "bqs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(short = 'l', long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output destination: stdout ('-'), stderr, or a file path
    #[arg(short = 'L', long, global = true, default_value = "stderr")]
    pub log_output: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer a schema from JSON records; reads stdin when no file is given
    Infer {
        /// Input files
        files: Vec<PathBuf>,

        /// Output schema file path ('-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Input layout
        #[arg(short, long, default_value = "stream")]
        input_format: DecoderFormat,

        /// Existing schema file to evolve instead of starting empty
        #[arg(short, long)]
        base: Option<PathBuf>,
    },

    /// Merge two schema files
    Merge {
        /// Existing schema
        old: PathBuf,

        /// Schema to merge into it
        new: PathBuf,

        /// Output schema file path ('-' for stdout)
        #[arg(short, long, default_value = "-")]
        output: String,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },

    /// Compare two schema files regardless of field order (exit 1 if different)
    Compare {
        a: PathBuf,
        b: PathBuf,
    },
}

/// Schema output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON schema file
    Json,
    /// YAML schema file
    Yaml,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}
