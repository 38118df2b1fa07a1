use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one table as an optional schema plus a table name.
///
/// `schema` is `None` on dialects without a schema concept; quoting then
/// renders a bare table identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    /// A schema-qualified table.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    /// A table on a dialect without schemas.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// One foreign-key constraint between two tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    /// Referenced (parent) side of the constraint.
    pub primary_key_table: TableRef,
    /// Referencing (child) side of the constraint.
    pub foreign_key_table: TableRef,
}

impl Relationship {
    /// Whether the constraint points back at its own table.
    ///
    /// A self-reference never keeps its table from being emptied in a
    /// single statement; whether the engine checks the constraint
    /// row-by-row mid-statement is engine-defined.
    pub fn is_self_referencing(&self) -> bool {
        self.primary_key_table == self.foreign_key_table
    }
}
