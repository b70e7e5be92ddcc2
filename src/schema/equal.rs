//! Order-independent structural equality

use crate::types::{Field, Schema};

/// Check two field lists for structural equality, ignoring order
///
/// Every attribute takes part in the comparison, children included.
pub fn equal(a: &[Field], b: &[Field]) -> bool {
    a.len() == b.len() && a.iter().all(|field| contains(b, field))
}

fn contains(fields: &[Field], wanted: &Field) -> bool {
    fields.iter().any(|field| field_equal(field, wanted))
}

fn field_equal(a: &Field, b: &Field) -> bool {
    a.name == b.name
        && a.field_type == b.field_type
        && a.description == b.description
        && a.required == b.required
        && a.repeated == b.repeated
        && a.max_length == b.max_length
        && a.precision == b.precision
        && a.scale == b.scale
        && a.default_value_expression == b.default_value_expression
        && a.collation == b.collation
        && equal(&a.children, &b.children)
}

impl Schema {
    /// Structural equality ignoring field order
    pub fn equivalent(&self, other: &Schema) -> bool {
        equal(self, other)
    }
}
