use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use scour_core::{Error, Result};

use super::{DatabaseClient, MetadataRow};

fn db_err(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

fn text_columns(row: &SqliteRow) -> Result<MetadataRow> {
    (0..row.len())
        .map(|idx| row.try_get::<Option<String>, _>(idx).map_err(db_err))
        .collect()
}

#[async_trait(?Send)]
impl DatabaseClient for SqliteConnection {
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<MetadataRow>> {
        let rows = sqlx::raw_sql(sql)
            .fetch_all(&mut *self)
            .await
            .map_err(db_err)?;
        rows.iter().map(text_columns).collect()
    }

    async fn execute(&mut self, sql: &str) -> Result<u64> {
        let done = sqlx::raw_sql(sql)
            .execute(&mut *self)
            .await
            .map_err(db_err)?;
        Ok(done.rows_affected())
    }

    async fn begin(&mut self) -> Result<()> {
        self.execute("BEGIN").await.map(|_| ())
    }

    async fn commit(&mut self) -> Result<()> {
        self.execute("COMMIT").await.map(|_| ())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.execute("ROLLBACK").await.map(|_| ())
    }
}
