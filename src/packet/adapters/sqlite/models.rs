//! Diesel row models for packet persistence.

use super::schema::{data_packets, manus_data, trae_data};
use diesel::prelude::*;

/// Insert model for the generic packet log.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = data_packets)]
pub struct NewPacketRow {
    /// Packet identifier.
    pub id: String,
    /// Producing adapter identifier.
    pub source_mcp: String,
    /// Packet tag.
    pub data_type: String,
    /// JSON object with the packet content.
    pub content: String,
    /// RFC 3339 packet timestamp.
    pub timestamp: String,
    /// Processed flag.
    pub processed: bool,
}

/// Row shape of the conversation projection table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = manus_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ConversationRow {
    /// Id of the originating packet.
    pub id: String,
    /// Conversation identifier.
    pub conversation_id: Option<String>,
    /// Message kind.
    pub message_type: Option<String>,
    /// Message body.
    pub content: Option<String>,
    /// RFC 3339 packet timestamp.
    pub timestamp: String,
    /// JSON metadata.
    pub metadata: String,
}

/// Row shape of the code interaction projection table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = trae_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CodeInteractionRow {
    /// Id of the originating packet.
    pub id: String,
    /// Editor session identifier.
    pub session_id: Option<String>,
    /// Interaction kind.
    pub interaction_type: Option<String>,
    /// Code involved in the interaction.
    pub code_content: Option<String>,
    /// RFC 3339 packet timestamp.
    pub timestamp: String,
    /// JSON metadata.
    pub metadata: String,
}
