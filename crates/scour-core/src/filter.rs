/// Filters applied while introspecting the schema.
///
/// `tables_to_ignore` matches on the bare table name regardless of schema.
/// `schemas_to_include` narrows introspection to the listed schemas, while
/// `schemas_to_exclude` removes the listed ones; both are handed to the
/// dialect's catalog queries, which apply them uniformly to the table and
/// relationship lookups. The default filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct ResetFilter {
    pub tables_to_ignore: Vec<String>,
    pub schemas_to_include: Vec<String>,
    pub schemas_to_exclude: Vec<String>,
}
