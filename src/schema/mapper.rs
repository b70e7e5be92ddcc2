//! Scalar kind to column type mapping

use super::shape::ScalarKind;
use crate::error::{Error, Result};
use crate::types::FieldType;

/// Map a scalar kind onto a leaf column type
pub fn map_scalar(kind: ScalarKind) -> Result<FieldType> {
    match kind {
        ScalarKind::Str | ScalarKind::Char => Ok(FieldType::String),
        ScalarKind::I8
        | ScalarKind::I16
        | ScalarKind::I32
        | ScalarKind::I64
        | ScalarKind::I128
        | ScalarKind::Isize
        | ScalarKind::U8
        | ScalarKind::U16
        | ScalarKind::U32
        | ScalarKind::U64
        | ScalarKind::U128
        | ScalarKind::Usize => Ok(FieldType::Integer),
        ScalarKind::F32 | ScalarKind::F64 => Ok(FieldType::Float),
        ScalarKind::Bool => Ok(FieldType::Boolean),
        ScalarKind::Timestamp => Ok(FieldType::Timestamp),
        ScalarKind::Unsupported(name) => Err(Error::unsupported_type(name)),
    }
}
