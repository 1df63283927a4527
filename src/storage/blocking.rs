//! Blocking operation helpers for `SQLite` stores.
//!
//! Diesel connections are synchronous, so every query is moved onto
//! [`tokio::task::spawn_blocking`] to keep the async executor free.

use super::{SqlitePool, StorageError};
use diesel::SqliteConnection;

/// Checks a connection out of `pool` and runs `f` with it on the blocking
/// thread pool.
///
/// Pool and join failures are converted into the caller's error type.
pub(crate) async fn with_connection<F, T, E>(pool: &SqlitePool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<StorageError> + Send + 'static,
{
    let owned_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = owned_pool.get().map_err(|err| E::from(StorageError::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(StorageError::Join(err.to_string())))?
}
