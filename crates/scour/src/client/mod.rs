//! Connection capability used by the introspector and the checkpoint.
//!
//! Implementations over the sqlx Postgres, MySQL, and SQLite connections
//! ship in this module; any other driver works by implementing
//! [`DatabaseClient`] over it.

use async_trait::async_trait;

use scour_core::Result;

mod mysql;
mod postgres;
mod sqlite;

/// One row of catalog output: nullable text columns in query order.
pub type MetadataRow = Vec<Option<String>>;

/// Minimal capability scour needs from a database driver.
///
/// A checkpoint borrows a client exclusively for the duration of one
/// reset, so implementations need no internal synchronization. Failures
/// surface as [`scour_core::Error::Db`]; nothing is retried.
#[async_trait(?Send)]
pub trait DatabaseClient: Send {
    /// Run a catalog query and materialize every row as text columns.
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<MetadataRow>>;

    /// Execute a single statement, returning the affected row count.
    async fn execute(&mut self, sql: &str) -> Result<u64>;

    async fn begin(&mut self) -> Result<()>;
    async fn commit(&mut self) -> Result<()>;
    async fn rollback(&mut self) -> Result<()>;
}
