//! Wire payloads and their validation.
//!
//! Tags and statuses arrive as plain strings so that an unknown value can
//! be reported against the field that carried it.

use super::ApiError;
use crate::adapter_registry::{
    domain::{AdapterId, AdapterStatus},
    services::RegisterAdapterRequest,
};
use crate::packet::domain::{DataPacket, DataType, PacketId, parse_packet_timestamp};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of `POST /api/mcp/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAdapterPayload {
    /// Adapter identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Network endpoint.
    pub endpoint: String,
    /// Lifecycle status; `active` when absent.
    #[serde(default)]
    pub status: Option<String>,
    /// Data type tags the adapter may produce.
    #[serde(default)]
    pub data_types: Vec<String>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl TryFrom<RegisterAdapterPayload> for RegisterAdapterRequest {
    type Error = ApiError;

    fn try_from(payload: RegisterAdapterPayload) -> Result<Self, Self::Error> {
        let status = match payload.status.as_deref() {
            None => AdapterStatus::default(),
            Some(raw) => AdapterStatus::try_from(raw).map_err(|err| ApiError::validation("status", err))?,
        };
        let data_types = payload
            .data_types
            .iter()
            .map(|tag| DataType::try_from(tag.as_str()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::validation("data_types", err))?;

        Ok(Self::new(payload.id, payload.name, payload.endpoint)
            .with_status(status)
            .with_data_types(data_types)
            .with_metadata(payload.metadata.unwrap_or_default()))
    }
}

/// Body of `POST /api/data/receive`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPacketPayload {
    /// Packet identifier.
    pub id: String,
    /// Producing adapter identifier.
    pub source_mcp: String,
    /// Packet tag.
    pub data_type: String,
    /// Tag-dependent content object.
    pub content: Map<String, Value>,
    /// RFC 3339 or naive ISO-8601 timestamp.
    pub timestamp: String,
}

impl TryFrom<SubmitPacketPayload> for DataPacket {
    type Error = ApiError;

    fn try_from(payload: SubmitPacketPayload) -> Result<Self, Self::Error> {
        let id = PacketId::new(payload.id).map_err(|err| ApiError::validation("id", err))?;
        let source =
            AdapterId::new(payload.source_mcp).map_err(|err| ApiError::validation("source_mcp", err))?;
        let data_type = DataType::try_from(payload.data_type.as_str())
            .map_err(|err| ApiError::validation("data_type", err))?;
        let timestamp = parse_packet_timestamp(&payload.timestamp)
            .map_err(|err| ApiError::validation("timestamp", err))?;

        Ok(Self::new(id, source, data_type, payload.content, timestamp))
    }
}
