use std::collections::BTreeSet;

use scour_core::{Relationship, ResetFilter, TableRef};

use crate::adapter::DbAdapter;
use crate::render::push_filter_clauses;

/// SQL Server adapter.
///
/// Identifiers are double-quoted, which assumes the session-default
/// `QUOTED_IDENTIFIER ON`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServer;

impl DbAdapter for SqlServer {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn build_table_query(&self, filter: &ResetFilter) -> String {
        let mut sql = String::from(
            "SELECT t.TABLE_SCHEMA, t.TABLE_NAME \
             FROM INFORMATION_SCHEMA.TABLES t \
             WHERE t.TABLE_TYPE = 'BASE TABLE'",
        );
        push_filter_clauses(&mut sql, filter, "t.TABLE_NAME", "t.TABLE_SCHEMA");
        sql.push_str(" ORDER BY t.TABLE_SCHEMA, t.TABLE_NAME");
        sql
    }

    fn build_relationship_query(&self, filter: &ResetFilter) -> String {
        let mut sql = String::from(
            "SELECT fk.name, \
             SCHEMA_NAME(pk_tab.schema_id), pk_tab.name, \
             SCHEMA_NAME(fk_tab.schema_id), fk_tab.name \
             FROM sys.foreign_keys fk \
             INNER JOIN sys.tables fk_tab ON fk_tab.object_id = fk.parent_object_id \
             INNER JOIN sys.tables pk_tab ON pk_tab.object_id = fk.referenced_object_id \
             WHERE 1 = 1",
        );
        push_filter_clauses(&mut sql, filter, "fk_tab.name", "SCHEMA_NAME(fk_tab.schema_id)");
        sql.push_str(" ORDER BY fk.name");
        sql
    }

    fn build_disable_fk_command(
        &self,
        tables: &BTreeSet<TableRef>,
        relationships: &[Relationship],
    ) -> String {
        // Suspend exactly the constraints that point at a cyclic table;
        // the child side owns each constraint.
        let q = self.quote_char();
        let mut sql = String::new();
        for rel in relationships {
            if !tables.contains(&rel.primary_key_table) {
                continue;
            }
            sql.push_str("ALTER TABLE ");
            sql.push_str(&self.quote_table(&rel.foreign_key_table));
            sql.push_str(" NOCHECK CONSTRAINT ");
            sql.push_str(&format!("{q}{}{q}", rel.name));
            sql.push_str(";\n");
        }
        sql
    }
}
