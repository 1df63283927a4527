//! Tag-specific records derived from packet content.
//!
//! Field extraction is lenient: a missing or `null` field becomes `None`,
//! strings are taken verbatim and any other JSON value is stored as its
//! serialised text. `metadata` defaults to an empty object.

use super::{DataPacket, PacketId, ProjectionKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Conversation row derived from a `manus_conversation` packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationRecord {
    /// Id of the originating packet.
    #[serde(rename = "id")]
    pub packet_id: PacketId,
    /// Conversation the message belongs to.
    pub conversation_id: Option<String>,
    /// Message kind (for example `thinking` or `reply`).
    pub message_type: Option<String>,
    /// Message body.
    pub content: Option<String>,
    /// Packet timestamp.
    pub timestamp: DateTime<Utc>,
    /// Free-form metadata from the packet content.
    pub metadata: Value,
}

impl ConversationRecord {
    /// Projects the conversation fields out of `packet`.
    #[must_use]
    pub fn from_packet(packet: &DataPacket) -> Self {
        let content = packet.content();
        Self {
            packet_id: packet.id().clone(),
            conversation_id: text_field(content, "conversation_id"),
            message_type: text_field(content, "message_type"),
            content: text_field(content, "content"),
            timestamp: packet.timestamp(),
            metadata: metadata_field(content),
        }
    }
}

/// Code interaction row derived from a `trae_code_interaction` packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeInteractionRecord {
    /// Id of the originating packet.
    #[serde(rename = "id")]
    pub packet_id: PacketId,
    /// Editor session the interaction belongs to.
    pub session_id: Option<String>,
    /// Interaction kind (for example `completion` or `edit`).
    pub interaction_type: Option<String>,
    /// Code involved in the interaction.
    pub code_content: Option<String>,
    /// Packet timestamp.
    pub timestamp: DateTime<Utc>,
    /// Free-form metadata from the packet content.
    pub metadata: Value,
}

impl CodeInteractionRecord {
    /// Projects the code interaction fields out of `packet`.
    #[must_use]
    pub fn from_packet(packet: &DataPacket) -> Self {
        let content = packet.content();
        Self {
            packet_id: packet.id().clone(),
            session_id: text_field(content, "session_id"),
            interaction_type: text_field(content, "interaction_type"),
            code_content: text_field(content, "code_content"),
            timestamp: packet.timestamp(),
            metadata: metadata_field(content),
        }
    }
}

/// A projected row of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    /// Row in the conversation store.
    Conversation(ConversationRecord),
    /// Row in the code interaction store.
    CodeInteraction(CodeInteractionRecord),
}

impl Projection {
    /// Returns the store this row belongs to.
    #[must_use]
    pub const fn kind(&self) -> ProjectionKind {
        match self {
            Self::Conversation(_) => ProjectionKind::Conversation,
            Self::CodeInteraction(_) => ProjectionKind::CodeInteraction,
        }
    }

    /// Returns the id of the packet the row was derived from.
    #[must_use]
    pub const fn packet_id(&self) -> &PacketId {
        match self {
            Self::Conversation(record) => &record.packet_id,
            Self::CodeInteraction(record) => &record.packet_id,
        }
    }

    /// Returns the packet timestamp carried by the row.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Conversation(record) => record.timestamp,
            Self::CodeInteraction(record) => record.timestamp,
        }
    }
}

fn text_field(content: &Map<String, Value>, key: &str) -> Option<String> {
    match content.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn metadata_field(content: &Map<String, Value>) -> Value {
    match content.get("metadata") {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(value) => value.clone(),
    }
}
