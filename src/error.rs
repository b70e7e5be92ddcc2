//! Error types for bqs
//!
//! This module defines the error hierarchy for the whole crate.
//! The schema engine only ever raises the four engine variants; the rest
//! belong to the decoding and command-line layers around it.

use thiserror::Error;

/// The main error type for bqs
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Schema Engine Errors
    // ============================================================================
    #[error("unsupported object, must be record or map: {kind}")]
    UnsupportedObject { kind: String },

    #[error("unsupported map key type, must be string: {kind}")]
    UnsupportedKeyType { kind: String },

    #[error("unsupported data type: {kind}")]
    UnsupportedDataType { kind: String },

    #[error("conflict field: field='{path}': {reason}")]
    ConflictField { path: String, reason: String },

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("{source_name}: record {record}: {inner}")]
    Record {
        source_name: String,
        record: usize,
        #[source]
        inner: Box<Error>,
    },

    #[error("Failed to decode input: {message}")]
    Decode { message: String },

    // ============================================================================
    // Configuration / I/O Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported object error
    pub fn unsupported_object(kind: impl Into<String>) -> Self {
        Self::UnsupportedObject { kind: kind.into() }
    }

    /// Create an unsupported key type error
    pub fn unsupported_key(kind: impl Into<String>) -> Self {
        Self::UnsupportedKeyType { kind: kind.into() }
    }

    /// Create an unsupported data type error
    pub fn unsupported_type(kind: impl Into<String>) -> Self {
        Self::UnsupportedDataType { kind: kind.into() }
    }

    /// Create a conflict error for the field at `path`
    pub fn conflict(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConflictField {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Attach the originating record to an error
    pub fn in_record(self, source_name: impl Into<String>, record: usize) -> Self {
        Self::Record {
            source_name: source_name.into(),
            record,
            inner: Box::new(self),
        }
    }

    /// The engine error underneath any record annotation
    pub fn root(&self) -> &Error {
        match self {
            Error::Record { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Check if this is a field conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self.root(), Error::ConflictField { .. })
    }

    /// Dotted path of the conflicting field, if this is a conflict
    pub fn conflict_path(&self) -> Option<&str> {
        match self.root() {
            Error::ConflictField { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for bqs
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::conflict("key1.key3", "type conflict (old=INTEGER, new=STRING)");
        assert_eq!(
            err.to_string(),
            "conflict field: field='key1.key3': type conflict (old=INTEGER, new=STRING)"
        );

        let err = Error::unsupported_key("i32");
        assert_eq!(
            err.to_string(),
            "unsupported map key type, must be string: i32"
        );

        let err = Error::unsupported_object("string");
        assert_eq!(
            err.to_string(),
            "unsupported object, must be record or map: string"
        );
    }

    #[test]
    fn test_record_annotation() {
        let err = Error::conflict("x.y", "type conflict").in_record("data.jsonl", 3);
        assert!(err
            .to_string()
            .starts_with("data.jsonl: record 3: conflict field"));
        assert!(err.is_conflict());
        assert_eq!(err.conflict_path(), Some("x.y"));

        let err = Error::unsupported_type("complex").in_record("(stdin)", 1);
        assert!(!err.is_conflict());
        assert!(err.conflict_path().is_none());
    }
}
