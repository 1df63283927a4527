//! Generic packet log port.

use crate::packet::domain::{DataPacket, DataType};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for packet store operations.
pub type PacketStoreResult<T> = Result<T, PacketStoreError>;

/// Generic, id-keyed log of every submitted packet.
#[async_trait]
pub trait PacketLog: Send + Sync {
    /// Records `packet`, replacing any earlier packet with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`PacketStoreError::Persistence`] when the write fails.
    async fn append(&self, packet: &DataPacket) -> PacketStoreResult<()>;

    /// Counts logged packets grouped by tag.
    ///
    /// Tags with no packets may be absent from the result.
    async fn count_by_data_type(&self) -> PacketStoreResult<HashMap<DataType, u64>>;
}

/// Errors returned by packet log and projection store implementations.
#[derive(Debug, Clone, Error)]
pub enum PacketStoreError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PacketStoreError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
