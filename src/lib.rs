// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # bqs
//!
//! Schema tooling for column-oriented warehouse tables.
//!
//! ## Features
//!
//! - **Inference**: Derive a table schema from any [`schema::Inferable`] value,
//!   including typed records and decoded JSON
//! - **Merge**: Evolve an existing schema with a newly observed one, reporting
//!   incompatible changes as conflicts with the offending field path
//! - **Equality**: Compare schemas regardless of field order
//!
//! ## Quick Start
//!
//! ```rust
//! use bqs::{infer, merge, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let current = infer(&json!({"id": 1, "tags": ["a"]}))?;
//!     let observed = infer(&json!({"id": 2, "name": "b"}))?;
//!
//!     let evolved = merge(&current, &observed)?;
//!     let names: Vec<&str> = evolved.iter().map(|f| f.name.as_str()).collect();
//!     assert_eq!(names, ["id", "name", "tags"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐
//! │   decode     │──▶│  Inferable   │──▶│ infer → Schema    │
//! │ JSON / JSONL │   │   (Shape)    │   └─────────┬─────────┘
//! └──────────────┘   └──────────────┘             │
//!                                     ┌───────────▼───────────┐
//!                                     │ merge(old, new)       │
//!                                     │ equal(a, b)           │
//!                                     └───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Schema and field definitions
pub mod types;

/// Schema inference, merge and equality
pub mod schema;

/// Sample record decoders (JSON, JSONL, concatenated JSON)
pub mod decode;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::{Field, FieldType, Mode, Schema};

pub use schema::{equal, infer, merge, Inferable, SchemaAccumulator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
