//! CLI module
//!
//! Command-line interface for the schema tools.
//!
//! # Commands
//!
//! - `infer` - Infer a schema from JSON sample records
//! - `merge` - Merge two schema files
//! - `compare` - Check two schema files for structural equality

mod commands;
mod logging;
mod runner;

pub use commands::{Cli, Commands, LogLevel, OutputFormat};
pub use logging::init_logging;
pub use runner::{load_schema, render_schema, Outcome, Runner, STDIN_SOURCE};
