//! Record decoder module
//!
//! Supports: concatenated JSON, JSONL, single JSON documents
//!
//! # Overview
//!
//! Decoders turn sample input into `serde_json::Value` records that the
//! schema inferrer can walk.

mod decoders;
mod types;

pub use decoders::{JsonDecoder, JsonStreamDecoder, JsonlDecoder};
pub use types::{DecoderFormat, RecordDecoder};
