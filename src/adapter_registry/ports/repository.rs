//! Durable store port for registered adapters.

use crate::adapter_registry::domain::{AdapterId, McpAdapter};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for adapter store operations.
pub type AdapterStoreResult<T> = Result<T, AdapterStoreError>;

/// Adapter persistence contract.
#[async_trait]
pub trait AdapterStore: Send + Sync {
    /// Inserts or replaces the record keyed by the adapter identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterStoreError::Persistence`] when the write fails.
    async fn upsert(&self, adapter: &McpAdapter) -> AdapterStoreResult<()>;

    /// Finds a persisted adapter by identifier.
    ///
    /// Returns `None` when no record exists. The registry only writes
    /// through this port; reads serve durability checks and tooling that
    /// inspects the store directly, since the status view is never
    /// rehydrated from it.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterStoreError::InvalidPersistedData`] when the stored
    /// row cannot be rebuilt, or [`AdapterStoreError::Persistence`] when the
    /// read fails.
    async fn find(&self, id: &AdapterId) -> AdapterStoreResult<Option<McpAdapter>>;

    /// Returns every persisted adapter, including those pruned from the
    /// registry's in-memory view.
    ///
    /// Like [`find`](Self::find), this is not called by the registry itself.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`find`](Self::find).
    async fn list_all(&self) -> AdapterStoreResult<Vec<McpAdapter>>;
}

/// Errors returned by adapter store implementations.
#[derive(Debug, Clone, Error)]
pub enum AdapterStoreError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AdapterStoreError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
