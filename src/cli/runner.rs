//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::decode::{DecoderFormat, RecordDecoder};
use crate::error::{Error, Result};
use crate::schema::{merge, SchemaAccumulator};
use crate::types::Schema;
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Input name used for records read from standard input
pub const STDIN_SOURCE: &str = "(stdin)";

/// Result of a successful command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed
    Done,
    /// `compare` found the schemas different
    Different,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<Outcome> {
        match &self.cli.command {
            Commands::Infer {
                files,
                output,
                format,
                input_format,
                base,
            } => self.infer(files, output, *format, *input_format, base.as_deref()),
            Commands::Merge {
                old,
                new,
                output,
                format,
            } => self.merge(old, new, output, *format),
            Commands::Compare { a, b } => self.compare(a, b),
        }
    }

    fn infer(
        &self,
        files: &[PathBuf],
        output: &str,
        format: OutputFormat,
        input_format: DecoderFormat,
        base: Option<&Path>,
    ) -> Result<Outcome> {
        let mut accumulator = match base {
            Some(path) => SchemaAccumulator::with_base(load_schema(path)?),
            None => SchemaAccumulator::new(),
        };
        let decoder = input_format.decoder();

        if files.is_empty() {
            debug!(input = STDIN_SOURCE, "infer schema");
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            let records = decode_records(decoder.as_ref(), STDIN_SOURCE, &body)?;
            accumulator.observe_all(STDIN_SOURCE, &records)?;
        }

        for file in files {
            let source = file.display().to_string();
            debug!(input = %source, "infer schema");
            let body = fs::read_to_string(file).map_err(|e| {
                Error::config(format!("Failed to read input '{source}': {e}"))
            })?;
            let records = decode_records(decoder.as_ref(), &source, &body)?;
            accumulator.observe_all(&source, &records)?;
        }

        info!(
            records = accumulator.records(),
            fields = accumulator.schema().len(),
            "inferred schema"
        );
        write_output(output, &render_schema(accumulator.schema(), format)?)?;
        Ok(Outcome::Done)
    }

    fn merge(&self, old: &Path, new: &Path, output: &str, format: OutputFormat) -> Result<Outcome> {
        debug!(old = %old.display(), new = %new.display(), "merge schemas");
        let merged = merge(&load_schema(old)?, &load_schema(new)?)?;
        write_output(output, &render_schema(&merged, format)?)?;
        Ok(Outcome::Done)
    }

    fn compare(&self, a: &Path, b: &Path) -> Result<Outcome> {
        let same = load_schema(a)?.equivalent(&load_schema(b)?);
        debug!(a = %a.display(), b = %b.display(), same, "compare schemas");

        let mut stdout = io::stdout().lock();
        if same {
            writeln!(stdout, "equal")?;
            Ok(Outcome::Done)
        } else {
            writeln!(stdout, "different")?;
            Ok(Outcome::Different)
        }
    }
}

/// Decode one input, naming it in decode errors
fn decode_records(decoder: &dyn RecordDecoder, source: &str, body: &str) -> Result<Vec<Value>> {
    decoder.decode(body).map_err(|e| match e {
        Error::Decode { message } => Error::decode(format!("{source}: {message}")),
        other => other,
    })
}

/// Read a schema file; `.yaml`/`.yml` files are parsed as YAML, anything else as JSON
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read schema '{}': {e}", path.display()))
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => Schema::from_yaml(&content),
        _ => Schema::from_json(&content),
    }
}

/// Serialize a schema in the requested format
pub fn render_schema(schema: &Schema, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => schema.to_json_pretty(),
        OutputFormat::Yaml => schema.to_yaml(),
    }
}

/// Write to a file, or to stdout when `output` is `-`
fn write_output(output: &str, content: &str) -> Result<()> {
    if output == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        if !content.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        return Ok(());
    }

    fs::write(output, content)
        .map_err(|e| Error::config(format!("Failed to write '{output}': {e}")))?;
    info!(path = output, "wrote schema");
    Ok(())
}
