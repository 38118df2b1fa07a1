//! Per-engine SQL rendering.
//!
//! Every adapter is a pure text renderer: it turns a [`ResetFilter`] into
//! catalog queries and a resolved plan into delete/disable commands, and
//! never touches a connection itself.
//!
//! [`ResetFilter`]: scour_core::ResetFilter

pub mod adapter;
pub mod mysql;
pub mod postgres;
mod render;
pub mod sqlite;
pub mod sqlserver;

pub use adapter::DbAdapter;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use sqlserver::SqlServer;
