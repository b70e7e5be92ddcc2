//! Logger setup for the command-line tool

use super::commands::LogLevel;
use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` directives still apply on top of `level`.
pub fn init_logging(level: LogLevel, output: &str) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(level).into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match output {
        "-" | "stdout" => builder.with_writer(std::io::stdout).try_init(),
        "stderr" => builder.with_writer(std::io::stderr).try_init(),
        path => {
            let file = File::create(Path::new(path))
                .map_err(|e| Error::config(format!("Failed to open log file '{path}': {e}")))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| Error::config(format!("Failed to install logger: {e}")))
}
