use std::collections::BTreeSet;

use scour_core::{Relationship, ResetFilter, TableRef};

/// Per-engine strategy for rendering catalog queries and reset commands.
///
/// Implementations hold no state and perform no I/O; the same inputs always
/// produce the same SQL text. Adding a dialect means adding a new
/// implementation, not branching inside shared logic.
pub trait DbAdapter: Send + Sync {
    /// Engine identifier (e.g. `postgres`).
    fn name(&self) -> &'static str;

    /// Identifier-quoting character for the dialect.
    fn quote_char(&self) -> char;

    /// Render a table identifier, schema-qualified when a schema is set.
    fn quote_table(&self, table: &TableRef) -> String {
        let q = self.quote_char();
        match &table.schema {
            Some(schema) => format!("{q}{schema}{q}.{q}{name}{q}", name = table.name),
            None => format!("{q}{name}{q}", name = table.name),
        }
    }

    /// Catalog query yielding (schema, table) rows honoring the filter.
    ///
    /// The schema column is NULL on single-schema dialects. An empty filter
    /// must render a valid, unrestricted query.
    fn build_table_query(&self, filter: &ResetFilter) -> String;

    /// Catalog query yielding (constraint name, referenced schema,
    /// referenced table, referencing schema, referencing table) rows
    /// honoring the same filter.
    fn build_relationship_query(&self, filter: &ResetFilter) -> String;

    /// One `DELETE FROM` statement per table, in the given order.
    fn build_delete_command(&self, tables: &[TableRef]) -> String {
        let mut sql = String::new();
        for table in tables {
            sql.push_str("DELETE FROM ");
            sql.push_str(&self.quote_table(table));
            sql.push_str(";\n");
        }
        sql
    }

    /// Statements suspending FK enforcement for the named tables, to run
    /// before the deletes in the same transaction. An empty input renders
    /// an empty string.
    fn build_disable_fk_command(
        &self,
        tables: &BTreeSet<TableRef>,
        relationships: &[Relationship],
    ) -> String;
}
