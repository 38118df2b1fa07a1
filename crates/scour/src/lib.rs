//! Transactional test-database reset.
//!
//! `scour` empties every (filtered) table of a live database between test
//! runs without touching the schema. A [`Checkpoint`] introspects the
//! foreign-key graph once, computes a safe deletion order, renders the
//! dialect's SQL, and replays the cached plan inside one transaction on
//! every [`Checkpoint::reset`] call.
//!
//! ```no_run
//! use scour::{Checkpoint, CheckpointOptions, Postgres, ResetFilter};
//! use sqlx::{Connection, PgConnection};
//!
//! # async fn demo() -> scour::Result<()> {
//! let mut conn = PgConnection::connect("postgres://localhost/app_test")
//!     .await
//!     .map_err(|err| scour::Error::Db(err.to_string()))?;
//!
//! let checkpoint = Checkpoint::with_options(
//!     Postgres,
//!     CheckpointOptions {
//!         filter: ResetFilter {
//!             tables_to_ignore: vec!["schema_migrations".into()],
//!             ..ResetFilter::default()
//!         },
//!         ..CheckpointOptions::default()
//!     },
//! );
//!
//! checkpoint.reset(&mut conn).await?;
//! # Ok(())
//! # }
//! ```

pub mod checkpoint;
pub mod client;
pub mod introspect;

pub use checkpoint::{Checkpoint, CheckpointOptions};
pub use client::DatabaseClient;

pub use scour_core::{
    DeletionPlan, Error, Relationship, ResetFilter, Result, TableRef, resolve,
};
pub use scour_dialect::{DbAdapter, MySql, Postgres, Sqlite, SqlServer};
