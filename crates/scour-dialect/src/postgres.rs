use std::collections::BTreeSet;

use scour_core::{Relationship, ResetFilter, TableRef};

use crate::adapter::DbAdapter;
use crate::render::push_filter_clauses;

/// PostgreSQL adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl DbAdapter for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn build_table_query(&self, filter: &ResetFilter) -> String {
        let mut sql = String::from(
            "SELECT n.nspname, c.relname \
             FROM pg_class c \
             JOIN pg_namespace n ON n.oid = c.relnamespace \
             WHERE c.relkind = 'r' \
             AND n.nspname NOT LIKE 'pg_%' \
             AND n.nspname <> 'information_schema'",
        );
        push_filter_clauses(&mut sql, filter, "c.relname", "n.nspname");
        sql.push_str(" ORDER BY n.nspname, c.relname");
        sql
    }

    fn build_relationship_query(&self, filter: &ResetFilter) -> String {
        let mut sql = String::from(
            "SELECT con.conname, \
             ref_nsp.nspname, ref_rel.relname, \
             src_nsp.nspname, src_rel.relname \
             FROM pg_constraint con \
             JOIN pg_class src_rel ON src_rel.oid = con.conrelid \
             JOIN pg_namespace src_nsp ON src_nsp.oid = src_rel.relnamespace \
             JOIN pg_class ref_rel ON ref_rel.oid = con.confrelid \
             JOIN pg_namespace ref_nsp ON ref_nsp.oid = ref_rel.relnamespace \
             WHERE con.contype = 'f' \
             AND src_nsp.nspname NOT LIKE 'pg_%' \
             AND src_nsp.nspname <> 'information_schema'",
        );
        push_filter_clauses(&mut sql, filter, "src_rel.relname", "src_nsp.nspname");
        sql.push_str(" ORDER BY con.conname");
        sql
    }

    fn build_disable_fk_command(
        &self,
        tables: &BTreeSet<TableRef>,
        _relationships: &[Relationship],
    ) -> String {
        // FK enforcement rides on system triggers, so suspending the
        // table's triggers suspends its constraints.
        let mut sql = String::new();
        for table in tables {
            sql.push_str("ALTER TABLE ");
            sql.push_str(&self.quote_table(table));
            sql.push_str(" DISABLE TRIGGER ALL;\n");
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_query_reads_the_system_catalog() {
        let sql = Postgres.build_table_query(&ResetFilter::default());
        assert!(sql.contains("pg_class"));
        assert!(sql.contains("NOT LIKE 'pg_%'"));
        assert!(sql.contains("c.relkind = 'r'"));
    }

    #[test]
    fn relationship_query_filters_the_referencing_side() {
        let filter = ResetFilter {
            tables_to_ignore: vec!["flyway_history".to_string()],
            schemas_to_include: vec!["app".to_string()],
            ..ResetFilter::default()
        };
        let sql = Postgres.build_relationship_query(&filter);
        assert!(sql.contains("con.contype = 'f'"));
        assert!(sql.contains("src_rel.relname NOT IN ('flyway_history')"));
        assert!(sql.contains("src_nsp.nspname IN ('app')"));
    }

    #[test]
    fn disable_command_suspends_triggers_per_table() {
        let disable = BTreeSet::from([
            TableRef::new("public", "a"),
            TableRef::new("public", "b"),
        ]);
        let sql = Postgres.build_disable_fk_command(&disable, &[]);
        assert_eq!(
            sql,
            "ALTER TABLE \"public\".\"a\" DISABLE TRIGGER ALL;\n\
             ALTER TABLE \"public\".\"b\" DISABLE TRIGGER ALL;\n"
        );
    }
}
