//! Service layer for adapter registration.
//!
//! [`AdapterRegistry`] owns the in-process view of known adapters. Every
//! registration is written to the durable [`AdapterStore`] first and only
//! then reflected in memory, so a failed write leaves the view untouched.
//! Status queries are answered from memory and therefore only cover
//! registrations made during the lifetime of this instance.

use crate::adapter_registry::{
    domain::{AdapterDomainError, AdapterId, AdapterStatus, McpAdapter},
    ports::{AdapterStore, AdapterStoreError},
};
use crate::packet::domain::DataType;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Request payload for registering an adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterAdapterRequest {
    id: String,
    name: String,
    endpoint: String,
    status: AdapterStatus,
    data_types: Vec<DataType>,
    metadata: Map<String, Value>,
}

impl RegisterAdapterRequest {
    /// Creates a request with the required identity fields.
    ///
    /// Status defaults to [`AdapterStatus::Active`]; data types and metadata
    /// default to empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            endpoint: endpoint.into(),
            status: AdapterStatus::default(),
            data_types: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Sets the reported lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: AdapterStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the data types the adapter may produce.
    #[must_use]
    pub fn with_data_types(mut self, data_types: impl IntoIterator<Item = DataType>) -> Self {
        self.data_types = data_types.into_iter().collect();
        self
    }

    /// Sets free-form metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Status projection of a registered adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterStatusView {
    /// Display name.
    pub name: String,
    /// Reported lifecycle status.
    pub status: AdapterStatus,
    /// Time of the most recent registration.
    pub last_heartbeat: DateTime<Utc>,
    /// Declared data types.
    pub data_types: Vec<DataType>,
}

impl From<&McpAdapter> for AdapterStatusView {
    fn from(adapter: &McpAdapter) -> Self {
        Self {
            name: adapter.name().to_owned(),
            status: adapter.status(),
            last_heartbeat: adapter.last_heartbeat(),
            data_types: adapter.data_types().to_vec(),
        }
    }
}

/// Service-level errors for adapter registry operations.
#[derive(Debug, Error)]
pub enum AdapterRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AdapterDomainError),
    /// The durable store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] AdapterStoreError),
    /// The registry has been closed.
    #[error("adapter registry is closed")]
    Closed,
    /// The in-memory view is unusable after a panic in another thread.
    #[error("adapter registry state unavailable: {0}")]
    State(String),
}

/// Result type for adapter registry operations.
pub type AdapterRegistryResult<T> = Result<T, AdapterRegistryError>;

/// In-memory adapter view; `None` once the registry is closed.
type AdapterView = Option<HashMap<AdapterId, McpAdapter>>;

/// Adapter registration service with an explicit open/close lifecycle.
pub struct AdapterRegistry<S, C>
where
    S: AdapterStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
    adapters: RwLock<AdapterView>,
}

impl<S, C> AdapterRegistry<S, C>
where
    S: AdapterStore,
    C: Clock + Send + Sync,
{
    /// Creates an open registry with an empty in-memory view.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            adapters: RwLock::new(Some(HashMap::new())),
        }
    }

    /// Registers an adapter, replacing any previous record with the same id.
    ///
    /// The durable write happens before the in-memory insert, with no lock
    /// held across it. If [`close`](Self::close) runs in between, the record
    /// stays persisted but the call still returns
    /// [`AdapterRegistryError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Domain`] when a field is blank,
    /// [`AdapterRegistryError::Store`] when the durable write fails (the
    /// in-memory view is then unchanged), or [`AdapterRegistryError::Closed`]
    /// after [`close`](Self::close).
    pub async fn register(
        &self,
        request: RegisterAdapterRequest,
    ) -> AdapterRegistryResult<McpAdapter> {
        self.ensure_open()?;

        let RegisterAdapterRequest {
            id,
            name,
            endpoint,
            status,
            data_types,
            metadata,
        } = request;

        let adapter_id = AdapterId::new(id)?;
        let adapter = McpAdapter::new(
            adapter_id,
            name,
            endpoint,
            status,
            data_types,
            metadata,
            &*self.clock,
        )?;

        if let Err(err) = self.store.upsert(&adapter).await {
            error!(adapter_id = %adapter.id(), error = %err, "failed to persist adapter registration");
            return Err(err.into());
        }

        let mut guard = self.write_state()?;
        let Some(adapters) = guard.as_mut() else {
            warn!(
                adapter_id = %adapter.id(),
                "registry closed during registration; durable record kept"
            );
            return Err(AdapterRegistryError::Closed);
        };
        let replaced = adapters
            .insert(adapter.id().clone(), adapter.clone())
            .is_some();
        drop(guard);

        info!(
            adapter_id = %adapter.id(),
            name = adapter.name(),
            status = %adapter.status(),
            replaced,
            "adapter registered"
        );
        Ok(adapter)
    }

    /// Returns a status projection for every adapter registered through
    /// this instance, keyed by adapter id.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Closed`] after [`close`](Self::close).
    pub fn status(&self) -> AdapterRegistryResult<BTreeMap<AdapterId, AdapterStatusView>> {
        let guard = self.read_state()?;
        let adapters = guard.as_ref().ok_or(AdapterRegistryError::Closed)?;
        debug!(count = adapters.len(), "adapter status requested");
        Ok(adapters
            .iter()
            .map(|(id, adapter)| (id.clone(), AdapterStatusView::from(adapter)))
            .collect())
    }

    /// Looks up an adapter in the in-memory view.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Closed`] after [`close`](Self::close).
    pub fn find(&self, id: &AdapterId) -> AdapterRegistryResult<Option<McpAdapter>> {
        let guard = self.read_state()?;
        let adapters = guard.as_ref().ok_or(AdapterRegistryError::Closed)?;
        Ok(adapters.get(id).cloned())
    }

    /// Returns the number of adapters in the in-memory view.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Closed`] after [`close`](Self::close).
    pub fn len(&self) -> AdapterRegistryResult<usize> {
        let guard = self.read_state()?;
        guard
            .as_ref()
            .map(HashMap::len)
            .ok_or(AdapterRegistryError::Closed)
    }

    /// Returns whether the in-memory view holds no adapters.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Closed`] after [`close`](Self::close).
    pub fn is_empty(&self) -> AdapterRegistryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drops adapters whose last heartbeat is at least `max_age` old from
    /// the in-memory view and returns their ids in ascending order.
    ///
    /// Durable records are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterRegistryError::Closed`] after [`close`](Self::close).
    pub fn prune_stale(&self, max_age: chrono::Duration) -> AdapterRegistryResult<Vec<AdapterId>> {
        let now = self.clock.utc();
        let mut guard = self.write_state()?;
        let adapters = guard.as_mut().ok_or(AdapterRegistryError::Closed)?;

        let mut stale: Vec<AdapterId> = adapters
            .values()
            .filter(|adapter| adapter.is_stale(now, max_age))
            .map(|adapter| adapter.id().clone())
            .collect();
        stale.sort();
        for id in &stale {
            adapters.remove(id);
        }
        drop(guard);

        if !stale.is_empty() {
            info!(count = stale.len(), "evicted stale adapters");
        }
        Ok(stale)
    }

    /// Returns the durable store backing this registry.
    ///
    /// The registry never reads the store back. Callers use this handle to
    /// check what was persisted, for example after
    /// [`prune_stale`](Self::prune_stale) evicts an adapter, or when
    /// [`register`](Self::register) loses a race with [`close`](Self::close).
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.adapters.read().map_or(true, |guard| guard.is_none())
    }

    /// Closes the registry, discarding the in-memory view.
    ///
    /// Subsequent operations fail with [`AdapterRegistryError::Closed`].
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let mut guard = self
            .adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(adapters) = guard.take() {
            info!(count = adapters.len(), "adapter registry closed");
        }
    }

    fn ensure_open(&self) -> AdapterRegistryResult<()> {
        if self.read_state()?.is_none() {
            return Err(AdapterRegistryError::Closed);
        }
        Ok(())
    }

    fn read_state(&self) -> AdapterRegistryResult<RwLockReadGuard<'_, AdapterView>> {
        self.adapters
            .read()
            .map_err(|err| AdapterRegistryError::State(err.to_string()))
    }

    fn write_state(&self) -> AdapterRegistryResult<RwLockWriteGuard<'_, AdapterView>> {
        self.adapters
            .write()
            .map_err(|err| AdapterRegistryError::State(err.to_string()))
    }
}
