use std::collections::BTreeSet;

use scour_core::{Relationship, ResetFilter, TableRef};

use crate::adapter::DbAdapter;
use crate::render::literal_list;

/// SQLite adapter.
///
/// SQLite has no schema concept, so the table query renders a NULL schema
/// column and every [`TableRef`] comes back bare. Schema include/exclude
/// filters are accepted and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl DbAdapter for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn build_table_query(&self, filter: &ResetFilter) -> String {
        let mut sql = String::from(
            "SELECT NULL, m.name \
             FROM sqlite_master m \
             WHERE m.type = 'table' \
             AND m.name NOT LIKE 'sqlite_%'",
        );
        push_ignore_clause(&mut sql, filter, "m.name");
        sql.push_str(" ORDER BY m.name");
        sql
    }

    fn build_relationship_query(&self, filter: &ResetFilter) -> String {
        // sqlite_master knows nothing about constraint names, so one is
        // synthesized from the child table and the pragma's constraint id.
        // seq = 0 keeps one row per constraint for composite keys.
        let mut sql = String::from(
            "SELECT 'fk_' || m.name || '_' || fk.\"id\", \
             NULL, fk.\"table\", \
             NULL, m.name \
             FROM sqlite_master m \
             JOIN pragma_foreign_key_list(m.name) fk \
             WHERE m.type = 'table' \
             AND m.name NOT LIKE 'sqlite_%' \
             AND fk.seq = 0",
        );
        push_ignore_clause(&mut sql, filter, "m.name");
        sql.push_str(" ORDER BY m.name, fk.\"id\"");
        sql
    }

    fn build_disable_fk_command(
        &self,
        tables: &BTreeSet<TableRef>,
        _relationships: &[Relationship],
    ) -> String {
        // Defers enforcement to the end of the open transaction, by which
        // point every cyclic table is empty.
        if tables.is_empty() {
            String::new()
        } else {
            "PRAGMA defer_foreign_keys = 1;\n".to_string()
        }
    }
}

fn push_ignore_clause(sql: &mut String, filter: &ResetFilter, table_column: &str) {
    if !filter.tables_to_ignore.is_empty() {
        sql.push_str(&format!(
            " AND {table_column} NOT IN ({})",
            literal_list(&filter.tables_to_ignore)
        ));
    }
}
