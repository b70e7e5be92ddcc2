//! Decoder implementations
//!
//! Each decoder handles a specific input layout.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::{Deserializer, Value};

// ============================================================================
// JSON Decoder
// ============================================================================

/// Single-document JSON decoder
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        match value {
            Value::Array(records) => Ok(records),
            other => Ok(vec![other]),
        }
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON value per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| {
                Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
            })?;

            records.push(value);
        }

        Ok(records)
    }
}

// ============================================================================
// JSON Stream Decoder
// ============================================================================

/// Decoder for concatenated JSON values
///
/// Accepts JSONL as well as pretty-printed values laid out back to back.
#[derive(Debug, Clone, Default)]
pub struct JsonStreamDecoder;

impl JsonStreamDecoder {
    /// Create a new stream decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonStreamDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (i, value) in Deserializer::from_str(body).into_iter::<Value>().enumerate() {
            let value = value.map_err(|e| {
                Error::decode(format!("Failed to parse JSON value #{}: {e}", i + 1))
            })?;
            records.push(value);
        }

        Ok(records)
    }
}
