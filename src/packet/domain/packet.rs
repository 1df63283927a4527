//! Data packet value submitted by an adapter.

use super::{DataType, PacketId};
use crate::adapter_registry::domain::AdapterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single unit of tagged content.
///
/// The source adapter is recorded as given; it is not checked against the
/// registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPacket {
    id: PacketId,
    source_mcp: AdapterId,
    data_type: DataType,
    content: Map<String, Value>,
    timestamp: DateTime<Utc>,
    processed: bool,
}

impl DataPacket {
    /// Creates an unprocessed packet.
    #[must_use]
    pub const fn new(
        id: PacketId,
        source_mcp: AdapterId,
        data_type: DataType,
        content: Map<String, Value>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            source_mcp,
            data_type,
            content,
            timestamp,
            processed: false,
        }
    }

    /// Returns the packet identifier.
    #[must_use]
    pub const fn id(&self) -> &PacketId {
        &self.id
    }

    /// Returns the adapter that produced the packet.
    #[must_use]
    pub const fn source_mcp(&self) -> &AdapterId {
        &self.source_mcp
    }

    /// Returns the packet tag.
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the tag-dependent content object.
    #[must_use]
    pub const fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    /// Returns the producer-supplied timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the processed flag. Nothing sets it after creation.
    #[must_use]
    pub const fn processed(&self) -> bool {
        self.processed
    }
}
