//! Tag-specific projection store port.

use super::PacketStoreResult;
use crate::packet::domain::{PacketId, Projection, ProjectionKind};
use async_trait::async_trait;

/// Stores the rows derived from packets whose tag has a projection.
#[async_trait]
pub trait ProjectionStore: Send + Sync {
    /// Writes a projected row, replacing any row derived from a packet with
    /// the same id.
    ///
    /// # Errors
    ///
    /// Returns [`super::PacketStoreError::Persistence`] when the write fails.
    async fn write(&self, projection: &Projection) -> PacketStoreResult<()>;

    /// Returns up to `limit` rows of `kind`, newest packet timestamp first.
    async fn recent(&self, kind: ProjectionKind, limit: usize) -> PacketStoreResult<Vec<Projection>>;

    /// Deletes the `kind` row derived from packet `id`. Missing rows are not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`super::PacketStoreError::Persistence`] when the delete fails.
    async fn remove(&self, kind: ProjectionKind, id: &PacketId) -> PacketStoreResult<()>;
}
