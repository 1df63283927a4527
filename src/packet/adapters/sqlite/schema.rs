//! Diesel schema for packet persistence.

diesel::table! {
    /// Generic log of every submitted packet.
    data_packets (id) {
        /// Caller-chosen packet identifier.
        id -> Text,
        /// Identifier of the producing adapter.
        source_mcp -> Text,
        /// Packet tag.
        data_type -> Text,
        /// JSON object with the packet content.
        content -> Text,
        /// RFC 3339 packet timestamp.
        timestamp -> Text,
        /// Processed flag, always false.
        processed -> Bool,
    }
}

diesel::table! {
    /// Conversation projection rows.
    manus_data (id) {
        /// Id of the originating packet.
        id -> Text,
        /// Conversation identifier.
        conversation_id -> Nullable<Text>,
        /// Message kind.
        message_type -> Nullable<Text>,
        /// Message body.
        content -> Nullable<Text>,
        /// RFC 3339 packet timestamp.
        timestamp -> Text,
        /// JSON metadata.
        metadata -> Text,
    }
}

diesel::table! {
    /// Code interaction projection rows.
    trae_data (id) {
        /// Id of the originating packet.
        id -> Text,
        /// Editor session identifier.
        session_id -> Nullable<Text>,
        /// Interaction kind.
        interaction_type -> Nullable<Text>,
        /// Code involved in the interaction.
        code_content -> Nullable<Text>,
        /// RFC 3339 packet timestamp.
        timestamp -> Text,
        /// JSON metadata.
        metadata -> Text,
    }
}
