use std::collections::BTreeSet;

use scour_core::{Relationship, ResetFilter, TableRef};

use crate::adapter::DbAdapter;
use crate::render::push_filter_clauses;

/// Schemas MySQL owns; never candidates for a reset.
const SYSTEM_SCHEMAS: &str = "'mysql', 'information_schema', 'performance_schema', 'sys'";

/// MySQL adapter.
///
/// A MySQL schema is a database, so the schema component of every
/// [`TableRef`] is the owning database name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl DbAdapter for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn build_table_query(&self, filter: &ResetFilter) -> String {
        let mut sql = format!(
            "SELECT t.TABLE_SCHEMA, t.TABLE_NAME \
             FROM information_schema.tables t \
             WHERE t.TABLE_TYPE = 'BASE TABLE' \
             AND t.TABLE_SCHEMA NOT IN ({SYSTEM_SCHEMAS})"
        );
        push_filter_clauses(&mut sql, filter, "t.TABLE_NAME", "t.TABLE_SCHEMA");
        sql.push_str(" ORDER BY t.TABLE_SCHEMA, t.TABLE_NAME");
        sql
    }

    fn build_relationship_query(&self, filter: &ResetFilter) -> String {
        let mut sql = format!(
            "SELECT rc.CONSTRAINT_NAME, \
             rc.UNIQUE_CONSTRAINT_SCHEMA, rc.REFERENCED_TABLE_NAME, \
             rc.CONSTRAINT_SCHEMA, rc.TABLE_NAME \
             FROM information_schema.referential_constraints rc \
             WHERE rc.CONSTRAINT_SCHEMA NOT IN ({SYSTEM_SCHEMAS})"
        );
        push_filter_clauses(&mut sql, filter, "rc.TABLE_NAME", "rc.CONSTRAINT_SCHEMA");
        sql.push_str(" ORDER BY rc.CONSTRAINT_NAME");
        sql
    }

    fn build_disable_fk_command(
        &self,
        tables: &BTreeSet<TableRef>,
        _relationships: &[Relationship],
    ) -> String {
        // MySQL only has the session-wide toggle. It is not re-enabled
        // here: the four-command contract ends at the delete, and the
        // flag dies with the session.
        if tables.is_empty() {
            String::new()
        } else {
            "SET FOREIGN_KEY_CHECKS=0;\n".to_string()
        }
    }
}
