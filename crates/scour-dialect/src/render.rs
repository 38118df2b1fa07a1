//! Shared text-rendering helpers for the dialect adapters.

use scour_core::ResetFilter;

/// Escape a value for embedding in a single-quoted SQL string literal.
pub(crate) fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a comma-separated list of quoted literals for an `IN (...)` clause.
pub(crate) fn literal_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{}'", escape_literal(value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Append the filter's `AND ... IN (...)` clauses against the given table
/// and schema expressions. Empty lists render nothing.
pub(crate) fn push_filter_clauses(
    sql: &mut String,
    filter: &ResetFilter,
    table_column: &str,
    schema_column: &str,
) {
    if !filter.tables_to_ignore.is_empty() {
        sql.push_str(&format!(
            " AND {table_column} NOT IN ({})",
            literal_list(&filter.tables_to_ignore)
        ));
    }
    if !filter.schemas_to_include.is_empty() {
        sql.push_str(&format!(
            " AND {schema_column} IN ({})",
            literal_list(&filter.schemas_to_include)
        ));
    }
    if !filter.schemas_to_exclude.is_empty() {
        sql.push_str(&format!(
            " AND {schema_column} NOT IN ({})",
            literal_list(&filter.schemas_to_exclude)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_pass_through() {
        assert_eq!(escape_literal("users"), "users");
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(escape_literal("o'brien"), "o''brien");
    }

    #[test]
    fn lists_are_comma_separated() {
        let values = vec!["a".to_string(), "b's".to_string()];
        assert_eq!(literal_list(&values), "'a', 'b''s'");
    }

    #[test]
    fn empty_filter_appends_nothing() {
        let mut sql = String::from("SELECT 1");
        push_filter_clauses(&mut sql, &ResetFilter::default(), "t.name", "t.schema");
        assert_eq!(sql, "SELECT 1");
    }
}
