//! In-memory adapter store for tests and ephemeral deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::adapter_registry::{
    domain::{AdapterId, McpAdapter},
    ports::{AdapterStore, AdapterStoreError, AdapterStoreResult},
};

/// Thread-safe in-memory adapter store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdapterStore {
    adapters: Arc<RwLock<HashMap<AdapterId, McpAdapter>>>,
}

impl InMemoryAdapterStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> AdapterStoreError {
    AdapterStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AdapterStore for InMemoryAdapterStore {
    async fn upsert(&self, adapter: &McpAdapter) -> AdapterStoreResult<()> {
        let mut adapters = self.adapters.write().map_err(poisoned)?;
        adapters.insert(adapter.id().clone(), adapter.clone());
        Ok(())
    }

    async fn find(&self, id: &AdapterId) -> AdapterStoreResult<Option<McpAdapter>> {
        let adapters = self.adapters.read().map_err(poisoned)?;
        Ok(adapters.get(id).cloned())
    }

    async fn list_all(&self) -> AdapterStoreResult<Vec<McpAdapter>> {
        let adapters = self.adapters.read().map_err(poisoned)?;
        Ok(adapters.values().cloned().collect())
    }
}
