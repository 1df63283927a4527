//! Shared `SQLite` storage plumbing.
//!
//! All durable stores in the crate share one connection pool. Each operation
//! checks a connection out, runs on the blocking thread pool and hands the
//! connection back before returning; no transaction is held across calls.

mod blocking;
mod codec;

pub(crate) use blocking::with_connection;
pub use codec::{text_to_timestamp, timestamp_to_text};

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError};
use std::path::Path;
use thiserror::Error;

/// `SQLite` connection pool type used by the durable adapters.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

const CREATE_TABLES_SQL: &str =
    include_str!("../../migrations/2024-01-01-000000_create_coordinator_tables/up.sql");

/// Errors raised while opening or using the shared pool.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The schema bootstrap statements failed.
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] diesel::result::Error),

    /// The blocking task running a query was cancelled or panicked.
    #[error("blocking task failed: {0}")]
    Join(String),
}

/// Opens a pool against the database file at `path` and creates the
/// coordinator tables when they do not exist yet.
///
/// # Errors
///
/// Returns [`StorageError::Pool`] when the pool cannot be built or
/// [`StorageError::Schema`] when table creation fails.
pub fn open_pool(path: &Path, max_size: u32) -> Result<SqlitePool, StorageError> {
    let manager = ConnectionManager::<SqliteConnection>::new(path.to_string_lossy());
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(BusyTimeout))
        .build(manager)?;
    initialise_schema(&pool)?;
    Ok(pool)
}

/// Runs the embedded table definitions against the pool.
///
/// The statements are idempotent, so calling this on an existing database is
/// harmless.
///
/// # Errors
///
/// Returns [`StorageError`] when a connection cannot be obtained or the DDL
/// fails.
pub fn initialise_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    let mut connection = pool.get()?;
    connection.batch_execute(CREATE_TABLES_SQL)?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct BusyTimeout;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for BusyTimeout {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}
