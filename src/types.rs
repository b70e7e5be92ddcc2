//! Schema data model
//!
//! A [`Schema`] is an ordered list of [`Field`]s; record fields nest another
//! list of fields as their children. Both serialize to the warehouse JSON
//! schema-file layout (`name`, `type`, `mode`, `fields`, ...).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

// ============================================================================
// Field Type
// ============================================================================

/// Leaf or record type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    #[serde(alias = "INT64")]
    Integer,
    #[serde(alias = "FLOAT64")]
    Float,
    #[serde(alias = "BOOL")]
    Boolean,
    Timestamp,
    #[serde(alias = "STRUCT")]
    Record,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "STRING"),
            FieldType::Integer => write!(f, "INTEGER"),
            FieldType::Float => write!(f, "FLOAT"),
            FieldType::Boolean => write!(f, "BOOLEAN"),
            FieldType::Timestamp => write!(f, "TIMESTAMP"),
            FieldType::Record => write!(f, "RECORD"),
        }
    }
}

// ============================================================================
// Field Mode
// ============================================================================

/// Column mode as written in schema files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

// ============================================================================
// Field
// ============================================================================

/// A named column descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FieldDef", into = "FieldDef")]
pub struct Field {
    /// Column name
    pub name: String,
    /// Column type
    pub field_type: FieldType,
    /// Free-form description
    pub description: Option<String>,
    /// Column holds a list of values
    pub repeated: bool,
    /// Column may not be null
    pub required: bool,
    /// Maximum length for STRING columns
    pub max_length: Option<i64>,
    /// Numeric precision
    pub precision: Option<i64>,
    /// Numeric scale
    pub scale: Option<i64>,
    /// Default value expression
    pub default_value_expression: Option<String>,
    /// Collation specification
    pub collation: Option<String>,
    /// Nested columns (only meaningful for RECORD)
    pub children: Vec<Field>,
}

impl Field {
    /// Create a nullable, non-repeated field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: None,
            repeated: false,
            required: false,
            max_length: None,
            precision: None,
            scale: None,
            default_value_expression: None,
            collation: None,
            children: Vec::new(),
        }
    }

    /// Create a RECORD field with the given children
    pub fn record(name: impl Into<String>, children: impl Into<Vec<Field>>) -> Self {
        Self {
            children: children.into(),
            ..Self::new(name, FieldType::Record)
        }
    }

    /// Mark the field as repeated
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Mark the field as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mode as written in schema files
    pub fn mode(&self) -> Mode {
        if self.repeated {
            Mode::Repeated
        } else if self.required {
            Mode::Required
        } else {
            Mode::Nullable
        }
    }

    /// Check if the field nests other fields
    pub fn is_record(&self) -> bool {
        self.field_type == FieldType::Record
    }
}

/// On-disk layout of a field
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldDef {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scale: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fields: Vec<Field>,
}

impl From<FieldDef> for Field {
    fn from(def: FieldDef) -> Self {
        Self {
            name: def.name,
            field_type: def.field_type,
            description: def.description,
            repeated: def.mode == Mode::Repeated,
            required: def.mode == Mode::Required,
            max_length: def.max_length,
            precision: def.precision,
            scale: def.scale,
            default_value_expression: def.default_value_expression,
            collation: def.collation,
            children: def.fields,
        }
    }
}

impl From<Field> for FieldDef {
    fn from(field: Field) -> Self {
        Self {
            mode: field.mode(),
            name: field.name,
            field_type: field.field_type,
            description: field.description,
            max_length: field.max_length,
            precision: field.precision,
            scale: field.scale,
            default_value_expression: field.default_value_expression,
            collation: field.collation,
            fields: field.children,
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Ordered list of fields describing a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Find a field by exact name
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Borrow the fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Parse a JSON schema file
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a YAML schema file
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Render as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Deref for Schema {
    type Target = [Field];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl From<Vec<Field>> for Schema {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl From<Schema> for Vec<Field> {
    fn from(schema: Schema) -> Self {
        schema.fields
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Schema {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
