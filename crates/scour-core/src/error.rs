use std::time::Duration;

use thiserror::Error;

/// Core error type shared across scour crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Driver, connectivity, or catalog failure.
    #[error("database error: {0}")]
    Db(String),
    /// A statement exceeded the configured command timeout.
    #[error("statement timed out after {0:?}")]
    Timeout(Duration),
    /// A requested capability is not available for this dialect.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for results returned by scour crates.
pub type Result<T> = std::result::Result<T, Error>;
