//! Schema introspection: runs the adapter's catalog queries and
//! materializes typed rows.

use tracing::debug;

use scour_core::{Error, Relationship, ResetFilter, Result, TableRef};
use scour_dialect::DbAdapter;

use crate::client::{DatabaseClient, MetadataRow};

/// Fetch the filtered set of tables.
///
/// Rows are expected as (schema, table); a NULL schema column yields a
/// bare [`TableRef`], the single-schema-dialect case.
pub async fn fetch_tables(
    client: &mut dyn DatabaseClient,
    adapter: &dyn DbAdapter,
    filter: &ResetFilter,
) -> Result<Vec<TableRef>> {
    let sql = adapter.build_table_query(filter);
    let rows = client.query_rows(&sql).await?;
    let tables = rows
        .into_iter()
        .map(map_table_row)
        .collect::<Result<Vec<_>>>()?;
    debug!(engine = adapter.name(), tables = tables.len(), "introspected tables");
    Ok(tables)
}

/// Fetch the filtered set of foreign-key relationships.
///
/// Rows are expected as (constraint name, referenced schema, referenced
/// table, referencing schema, referencing table), schemas nullable.
pub async fn fetch_relationships(
    client: &mut dyn DatabaseClient,
    adapter: &dyn DbAdapter,
    filter: &ResetFilter,
) -> Result<Vec<Relationship>> {
    let sql = adapter.build_relationship_query(filter);
    let rows = client.query_rows(&sql).await?;
    let relationships = rows
        .into_iter()
        .map(map_relationship_row)
        .collect::<Result<Vec<_>>>()?;
    debug!(
        engine = adapter.name(),
        relationships = relationships.len(),
        "introspected relationships"
    );
    Ok(relationships)
}

fn map_table_row(row: MetadataRow) -> Result<TableRef> {
    let mut columns = row.into_iter();
    let schema = columns.next().flatten();
    let name = columns
        .next()
        .flatten()
        .ok_or_else(|| malformed("table row is missing the table name"))?;
    Ok(TableRef { schema, name })
}

fn map_relationship_row(row: MetadataRow) -> Result<Relationship> {
    let mut columns = row.into_iter();
    let name = columns
        .next()
        .flatten()
        .ok_or_else(|| malformed("relationship row is missing the constraint name"))?;
    let pk_schema = columns.next().flatten();
    let pk_name = columns
        .next()
        .flatten()
        .ok_or_else(|| malformed("relationship row is missing the referenced table"))?;
    let fk_schema = columns.next().flatten();
    let fk_name = columns
        .next()
        .flatten()
        .ok_or_else(|| malformed("relationship row is missing the referencing table"))?;

    Ok(Relationship {
        name,
        primary_key_table: TableRef {
            schema: pk_schema,
            name: pk_name,
        },
        foreign_key_table: TableRef {
            schema: fk_schema,
            name: fk_name,
        },
    })
}

fn malformed(detail: &str) -> Error {
    Error::Db(format!("malformed catalog row: {detail}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_schema_qualified_table_rows() {
        let row = vec![Some("app".to_string()), Some("users".to_string())];
        assert_eq!(map_table_row(row).unwrap(), TableRef::new("app", "users"));
    }

    #[test]
    fn null_schema_yields_a_bare_table() {
        let row = vec![None, Some("memories".to_string())];
        assert_eq!(map_table_row(row).unwrap(), TableRef::bare("memories"));
    }

    #[test]
    fn missing_table_name_is_a_catalog_error() {
        let row = vec![Some("app".to_string()), None];
        assert!(matches!(map_table_row(row), Err(Error::Db(_))));
    }

    #[test]
    fn maps_relationship_rows() {
        let row = vec![
            Some("FK_FOO_BOB".to_string()),
            Some("dbo".to_string()),
            Some("Bob".to_string()),
            Some("dbo".to_string()),
            Some("Foo".to_string()),
        ];
        let rel = map_relationship_row(row).unwrap();
        assert_eq!(rel.name, "FK_FOO_BOB");
        assert_eq!(rel.primary_key_table, TableRef::new("dbo", "Bob"));
        assert_eq!(rel.foreign_key_table, TableRef::new("dbo", "Foo"));
        assert!(!rel.is_self_referencing());
    }
}
