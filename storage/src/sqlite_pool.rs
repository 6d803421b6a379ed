//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Path that opens a private in-memory database instead of a file.
pub const IN_MEMORY: &str = ":memory:";

/// Manages a single-connection SQLite pool; creates DB file if missing.
///
/// One connection is enough for chat-driven load and keeps an in-memory database alive for the
/// lifetime of the pool.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database file path, or [`IN_MEMORY`].
    pub async fn new(db_location: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", db_location);

        let options = if db_location == IN_MEMORY {
            SqliteConnectOptions::from_str("sqlite::memory:")?
        } else {
            SqliteConnectOptions::new()
                .create_if_missing(true)
                .filename(db_location)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
