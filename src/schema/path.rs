//! Dotted field paths used in conflict diagnostics

use std::fmt;

/// Path of enclosing field names, rendered as `outer.inner`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The schema root
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a field nested under this one
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
