//! Schema accumulation across many sample records

use super::inference::infer;
use super::merge::merge;
use super::shape::Inferable;
use crate::error::Result;
use crate::types::Schema;

/// Where a record came from, for error reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    /// Input name (file path, `(stdin)`, ...)
    pub source: String,
    /// 1-based record number within the source, counting decoded values
    /// rather than input lines
    pub record: usize,
}

impl Origin {
    pub fn new(source: impl Into<String>, record: usize) -> Self {
        Self {
            source: source.into(),
            record,
        }
    }
}

/// Folds the schemas of successive records into one evolving schema
#[derive(Debug, Clone, Default)]
pub struct SchemaAccumulator {
    schema: Schema,
    records: usize,
}

impl SchemaAccumulator {
    /// Start from an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing schema, e.g. a live table's
    pub fn with_base(schema: Schema) -> Self {
        Self { schema, records: 0 }
    }

    /// Infer the record's schema and merge it into the accumulated one
    ///
    /// On failure the accumulated schema is left as it was and the error
    /// carries the record's origin.
    pub fn observe<T: Inferable + ?Sized>(&mut self, value: &T, origin: &Origin) -> Result<()> {
        let inferred =
            infer(value).map_err(|e| e.in_record(origin.source.clone(), origin.record))?;
        let merged = merge(&self.schema, &inferred)
            .map_err(|e| e.in_record(origin.source.clone(), origin.record))?;

        self.schema = merged;
        self.records += 1;

        tracing::trace!(
            source = %origin.source,
            record = origin.record,
            fields = self.schema.len(),
            "merged record schema"
        );
        Ok(())
    }

    /// Observe every record of one source, numbering them from 1
    pub fn observe_all<'a, T, I>(&mut self, source: &str, values: I) -> Result<()>
    where
        T: Inferable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        for (i, value) in values.into_iter().enumerate() {
            self.observe(value, &Origin::new(source, i + 1))?;
        }
        Ok(())
    }

    /// Number of records merged so far
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn into_schema(self) -> Schema {
        self.schema
    }
}
