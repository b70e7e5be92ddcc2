//! Schema reconciliation
//!
//! Fields of the new schema come first, in their own order; old fields the
//! new schema never mentions follow in their original order. Names are
//! matched case-insensitively, as warehouse column names are.

use super::path::FieldPath;
use crate::error::{Error, Result};
use crate::types::{Field, Schema};
use std::collections::HashMap;

/// Merge `new` into `old`, returning a schema compatible with both
///
/// Fails with [`Error::ConflictField`] when a shared field disagrees on
/// type, `repeated` or `required`, when names differ only by case, or when
/// either side declares the same name twice. Neither input is modified.
pub fn merge(old: &Schema, new: &Schema) -> Result<Schema> {
    merge_at(&FieldPath::root(), old, new).map(Schema::from)
}

pub(crate) fn merge_at(path: &FieldPath, old: &[Field], new: &[Field]) -> Result<Vec<Field>> {
    let index = index_fields(path, old)?;
    index_fields(path, new)?;

    let mut matched = vec![false; old.len()];
    let mut result = Vec::with_capacity(old.len() + new.len());

    for field in new {
        let Some(&i) = index.get(&field.name.to_lowercase()) else {
            result.push(field.clone());
            continue;
        };

        let existing = &old[i];
        if existing.name != field.name {
            return Err(Error::conflict(
                path.child(&field.name).to_string(),
                format!(
                    "name conflict (old={}, new={})",
                    existing.name, field.name
                ),
            ));
        }

        matched[i] = true;
        result.push(merge_field(path, existing, field)?);
    }

    result.extend(
        old.iter()
            .zip(&matched)
            .filter(|(_, seen)| !**seen)
            .map(|(field, _)| field.clone()),
    );

    Ok(result)
}

/// Index fields by lowercased name, rejecting duplicates
///
/// Warehouse column names are case-insensitive, so siblings that differ
/// only by case are duplicates too.
pub(crate) fn index_fields(
    path: &FieldPath,
    fields: &[Field],
) -> Result<HashMap<String, usize>> {
    let mut index = HashMap::with_capacity(fields.len());

    for (i, field) in fields.iter().enumerate() {
        if let Some(prev) = index.insert(field.name.to_lowercase(), i) {
            return Err(Error::conflict(
                path.child(&field.name).to_string(),
                format!("duplicated field name (also declared as {})", fields[prev].name),
            ));
        }
    }

    Ok(index)
}

fn merge_field(path: &FieldPath, old: &Field, new: &Field) -> Result<Field> {
    let at = path.child(&new.name);

    if old.field_type != new.field_type {
        return Err(Error::conflict(
            at.to_string(),
            format!("type conflict (old={}, new={})", old.field_type, new.field_type),
        ));
    }
    if old.repeated != new.repeated {
        return Err(Error::conflict(
            at.to_string(),
            format!("repeated conflict (old={}, new={})", old.repeated, new.repeated),
        ));
    }
    if old.required != new.required {
        return Err(Error::conflict(
            at.to_string(),
            format!("required conflict (old={}, new={})", old.required, new.required),
        ));
    }

    let mut merged = new.clone();
    if !old.children.is_empty() {
        merged.children = if new.children.is_empty() {
            old.children.clone()
        } else {
            merge_at(&at, &old.children, &new.children)?
        };
    }

    Ok(merged)
}
