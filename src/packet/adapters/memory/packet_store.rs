//! In-memory packet log and projection store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::packet::{
    domain::{DataPacket, DataType, PacketId, Projection, ProjectionKind},
    ports::{PacketLog, PacketStoreError, PacketStoreResult, ProjectionStore},
};

/// Thread-safe in-memory implementation of both packet ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPacketStore {
    state: Arc<RwLock<InMemoryPacketState>>,
}

#[derive(Debug, Default)]
struct InMemoryPacketState {
    packets: HashMap<PacketId, DataPacket>,
    conversations: HashMap<PacketId, Projection>,
    code_interactions: HashMap<PacketId, Projection>,
}

impl InMemoryPacketState {
    const fn projections(&self, kind: ProjectionKind) -> &HashMap<PacketId, Projection> {
        match kind {
            ProjectionKind::Conversation => &self.conversations,
            ProjectionKind::CodeInteraction => &self.code_interactions,
        }
    }

    const fn projections_mut(&mut self, kind: ProjectionKind) -> &mut HashMap<PacketId, Projection> {
        match kind {
            ProjectionKind::Conversation => &mut self.conversations,
            ProjectionKind::CodeInteraction => &mut self.code_interactions,
        }
    }
}

impl InMemoryPacketStore {
    /// Creates empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logged packet with `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PacketStoreError::Persistence`] when the lock is poisoned.
    pub fn packet(&self, id: &PacketId) -> PacketStoreResult<Option<DataPacket>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.packets.get(id).cloned())
    }
}

fn poisoned(err: impl ToString) -> PacketStoreError {
    PacketStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PacketLog for InMemoryPacketStore {
    async fn append(&self, packet: &DataPacket) -> PacketStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.packets.insert(packet.id().clone(), packet.clone());
        Ok(())
    }

    async fn count_by_data_type(&self) -> PacketStoreResult<HashMap<DataType, u64>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut counts = HashMap::new();
        for packet in state.packets.values() {
            *counts.entry(packet.data_type()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

#[async_trait]
impl ProjectionStore for InMemoryPacketStore {
    async fn write(&self, projection: &Projection) -> PacketStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .projections_mut(projection.kind())
            .insert(projection.packet_id().clone(), projection.clone());
        Ok(())
    }

    async fn recent(&self, kind: ProjectionKind, limit: usize) -> PacketStoreResult<Vec<Projection>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut rows: Vec<Projection> = state.projections(kind).values().cloned().collect();
        rows.sort_by(|left, right| right.timestamp().cmp(&left.timestamp()));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn remove(&self, kind: ProjectionKind, id: &PacketId) -> PacketStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.projections_mut(kind).remove(id);
        Ok(())
    }
}
