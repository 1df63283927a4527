//! Registered adapter aggregate.

use super::{AdapterDomainError, AdapterId, AdapterStatus};
use crate::packet::domain::DataType;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An external producer known to the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpAdapter {
    id: AdapterId,
    name: String,
    endpoint: String,
    status: AdapterStatus,
    last_heartbeat: DateTime<Utc>,
    data_types: Vec<DataType>,
    metadata: Map<String, Value>,
}

/// Parameter object for reconstructing a persisted adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedAdapterData {
    /// Persisted adapter identifier.
    pub id: AdapterId,
    /// Persisted display name.
    pub name: String,
    /// Persisted network endpoint.
    pub endpoint: String,
    /// Persisted lifecycle status.
    pub status: AdapterStatus,
    /// Persisted heartbeat timestamp.
    pub last_heartbeat: DateTime<Utc>,
    /// Persisted declared data types.
    pub data_types: Vec<DataType>,
    /// Persisted free-form metadata.
    pub metadata: Map<String, Value>,
}

impl McpAdapter {
    /// Creates an adapter record stamped with the current clock time.
    ///
    /// Name and endpoint are trimmed. Duplicate data types are dropped while
    /// keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterDomainError::EmptyName`] or
    /// [`AdapterDomainError::EmptyEndpoint`] when the corresponding field is
    /// blank.
    pub fn new(
        id: AdapterId,
        raw_name: impl Into<String>,
        raw_endpoint: impl Into<String>,
        status: AdapterStatus,
        data_types: impl IntoIterator<Item = DataType>,
        metadata: Map<String, Value>,
        clock: &impl Clock,
    ) -> Result<Self, AdapterDomainError> {
        let name = raw_name.into().trim().to_owned();
        let endpoint = raw_endpoint.into().trim().to_owned();

        if name.is_empty() {
            return Err(AdapterDomainError::EmptyName);
        }
        if endpoint.is_empty() {
            return Err(AdapterDomainError::EmptyEndpoint);
        }

        let mut declared = Vec::new();
        for data_type in data_types {
            if !declared.contains(&data_type) {
                declared.push(data_type);
            }
        }

        Ok(Self {
            id,
            name,
            endpoint,
            status,
            last_heartbeat: clock.utc(),
            data_types: declared,
            metadata,
        })
    }

    /// Reconstructs an adapter from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAdapterData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            endpoint: data.endpoint,
            status: data.status,
            last_heartbeat: data.last_heartbeat,
            data_types: data.data_types,
            metadata: data.metadata,
        }
    }

    /// Returns the adapter identifier.
    #[must_use]
    pub const fn id(&self) -> &AdapterId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared network endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the reported lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AdapterStatus {
        self.status
    }

    /// Returns the time of the most recent registration.
    #[must_use]
    pub const fn last_heartbeat(&self) -> DateTime<Utc> {
        self.last_heartbeat
    }

    /// Returns the data types the adapter declared it may produce.
    #[must_use]
    pub fn data_types(&self) -> &[DataType] {
        &self.data_types
    }

    /// Returns the free-form metadata supplied at registration.
    #[must_use]
    pub const fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// Returns whether the heartbeat is at least `max_age` old at `now`.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: chrono::Duration) -> bool {
        now.signed_duration_since(self.last_heartbeat) >= max_age
    }
}
