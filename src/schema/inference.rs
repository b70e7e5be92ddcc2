//! Schema inference from value shapes

use super::mapper::map_scalar;
use super::merge::{index_fields, merge_at};
use super::path::FieldPath;
use super::shape::{Entry, Inferable, Key, Member, Sequence, Shape};
use crate::error::{Error, Result};
use crate::types::{Field, Schema};

/// Infer the schema of a record or keyed collection
///
/// The root value must decompose into named fields; a bare scalar or
/// sequence fails with [`Error::UnsupportedObject`].
pub fn infer<T: Inferable + ?Sized>(value: &T) -> Result<Schema> {
    infer_shape(&value.shape())
}

/// Infer the schema of an already-built shape
pub fn infer_shape(shape: &Shape) -> Result<Schema> {
    let fields = infer_object(&FieldPath::root(), shape)?;
    tracing::trace!(fields = fields.len(), "inferred schema");
    Ok(Schema::from(fields))
}

fn infer_object(path: &FieldPath, shape: &Shape) -> Result<Vec<Field>> {
    match shape {
        Shape::Optional(Some(inner)) => infer_object(path, inner),
        Shape::Record(members) => infer_record(path, members),
        Shape::Keyed(entries) => infer_keyed(path, entries),
        other => Err(Error::unsupported_object(other.kind())),
    }
}

fn infer_record(path: &FieldPath, members: &[Member]) -> Result<Vec<Field>> {
    let mut fields = Vec::new();
    let mut promoted = Vec::new();

    for member in members.iter().filter(|m| m.readable) {
        if member.embedded {
            promoted.extend(infer_object(path, &member.shape)?);
            continue;
        }

        let Some(name) = column_name(member) else {
            continue;
        };
        if let Some(field) = infer_field(&path.child(name), name, &member.shape)? {
            fields.push(field);
        }
    }

    // Declared fields shadow promoted ones of the same name
    for field in promoted {
        if !fields.iter().any(|f| f.name == field.name) {
            fields.push(field);
        }
    }

    index_fields(path, &fields)?;
    Ok(fields)
}

/// Resolve a member's column name; `None` excludes the member
fn column_name(member: &Member) -> Option<&str> {
    let serde_name = member
        .serde_name
        .as_deref()
        .map(|tag| tag.split_once(',').map_or(tag, |(name, _)| name));

    match (member.schema_name.as_deref(), serde_name) {
        (Some("-"), _) => None,
        (Some(name), _) if !name.is_empty() => Some(name),
        (_, Some("-")) => None,
        (_, Some(name)) if !name.is_empty() => Some(name),
        _ => Some(&member.ident),
    }
}

fn infer_keyed(path: &FieldPath, entries: &[Entry]) -> Result<Vec<Field>> {
    let mut fields = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = match &entry.key {
            Key::Str(name) => name,
            Key::Other(kind) => return Err(Error::unsupported_key(*kind)),
        };
        if let Some(field) = infer_field(&path.child(name), name, &entry.shape)? {
            fields.push(field);
        }
    }

    index_fields(path, &fields)?;
    Ok(fields)
}

/// Infer one column; `None` when the value contributes no column
fn infer_field(path: &FieldPath, name: &str, shape: &Shape) -> Result<Option<Field>> {
    match shape {
        Shape::Optional(Some(inner)) => infer_field(path, name, inner),
        Shape::Optional(None) => Ok(None),
        Shape::Scalar(kind) => Ok(Some(Field::new(name, map_scalar(*kind)?))),
        Shape::Record(_) | Shape::Keyed(_) => {
            let children = infer_object(path, shape)?;
            if children.is_empty() {
                return Ok(None);
            }
            Ok(Some(Field::record(name, children)))
        }
        Shape::Ordered(Sequence::Empty(None)) => Ok(None),
        Shape::Ordered(Sequence::Empty(Some(element))) => {
            Ok(infer_field(path, name, element)?.map(Field::repeated))
        }
        Shape::Ordered(Sequence::Elements(elements)) => infer_elements(path, name, elements),
    }
}

fn infer_elements(path: &FieldPath, name: &str, elements: &[Shape]) -> Result<Option<Field>> {
    let mut merged: Option<Field> = None;

    for element in elements {
        let Some(field) = infer_field(path, name, element)? else {
            continue;
        };

        merged = Some(match merged {
            None => field,
            Some(mut acc) => {
                if acc.field_type != field.field_type {
                    return Err(Error::conflict(
                        path.to_string(),
                        format!(
                            "type conflict in sequence (old={}, new={})",
                            acc.field_type, field.field_type
                        ),
                    ));
                }
                if !field.children.is_empty() {
                    acc.children = merge_at(path, &acc.children, &field.children)?;
                }
                acc
            }
        });
    }

    Ok(merged.map(Field::repeated))
}
