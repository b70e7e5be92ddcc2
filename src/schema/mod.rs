//! Schema inference module
//!
//! Infers warehouse table schemas from sample values, reconciles schemas
//! as more samples arrive, and compares schemas structurally.
//!
//! # Features
//!
//! - **Type Mapping**: Scalar kinds map onto leaf column types
//! - **Tree Inference**: Records, maps and sequences become nested columns
//! - **Schema Merging**: Evolves a schema with conflict detection
//! - **Structural Equality**: Compares schemas regardless of field order

mod accumulator;
mod equal;
mod inference;
mod mapper;
mod merge;
mod path;
mod shape;

pub use accumulator::{Origin, SchemaAccumulator};
pub use equal::equal;
pub use inference::{infer, infer_shape};
pub use mapper::map_scalar;
pub use merge::merge;
pub use path::FieldPath;
pub use shape::{
    default_shape, Entry, Inferable, Key, MapKey, Member, ScalarKind, Sequence, Shape,
};
