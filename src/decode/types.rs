//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layout of the sample input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// Concatenated JSON values, whitespace separated (default)
    #[default]
    Stream,
    /// JSON Lines (one value per line)
    Jsonl,
    /// A single JSON document; a top-level array holds the records
    Json,
}

impl DecoderFormat {
    /// Build the decoder for this format
    pub fn decoder(self) -> Box<dyn RecordDecoder> {
        match self {
            DecoderFormat::Stream => Box::new(super::JsonStreamDecoder::new()),
            DecoderFormat::Jsonl => Box::new(super::JsonlDecoder::new()),
            DecoderFormat::Json => Box::new(super::JsonDecoder::new()),
        }
    }
}

/// Trait for decoding input text into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the input into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}
