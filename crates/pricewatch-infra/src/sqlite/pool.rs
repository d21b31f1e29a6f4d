//! Database pool with split reader/writer connections in WAL mode.
//!
//! SQLite allows only one writer at a time. `DatabasePool` keeps a
//! multi-connection reader pool for concurrent reads and a single-connection
//! writer pool for serialized writes. Both use WAL journal mode and enforce
//! foreign keys.
//!
//! The pool is the persistence handle: it is built once at startup and
//! cloned into every repository. There is no process-wide engine.

use pricewatch_types::config::DatabaseConfig;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// Split read/write pool for SQLite with WAL mode.
///
/// - `reader`: Multi-connection pool for concurrent SELECT queries.
/// - `writer`: Single-connection pool for serialized INSERT/UPDATE/DELETE.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open both pools. Does not touch the schema; see [`Self::init_schema`].
    ///
    /// Fails if the database cannot be opened.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let base_opts = SqliteConnectOptions::from_str(&config.url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .create_if_missing(true);

        let read_opts = base_opts.clone().read_only(true);
        let write_opts = base_opts;

        // Writer first so the file exists before read-only connections open it
        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(write_opts)
            .await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(read_opts)
            .await?;

        tracing::debug!(url = %config.url, "database pools opened");
        Ok(Self { reader, writer })
    }

    /// Connect and make sure the schema exists.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, OpenError> {
        let pool = Self::connect(config).await?;
        pool.init_schema().await?;
        Ok(pool)
    }

    /// Create the `products` and `price_history` tables if they are missing.
    ///
    /// Idempotent: already-applied migrations are skipped.
    pub async fn init_schema(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.writer).await?;
        tracing::info!("database schema initialized");
        Ok(())
    }

    /// Acquire a read connection for one operation. The connection returns
    /// to the pool when the guard is dropped, on success and on error alike.
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.reader.acquire().await
    }

    /// Begin a write transaction. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.writer.begin().await
    }

    /// Close both pools, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.writer.close().await;
        self.reader.close().await;
    }
}

/// Errors raised while opening the persistence handle.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("failed to open database: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("failed to initialize schema: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
