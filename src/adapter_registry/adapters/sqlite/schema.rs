//! Diesel schema for adapter persistence.

diesel::table! {
    /// Registered adapter records.
    mcp_adapters (id) {
        /// Caller-chosen adapter identifier.
        id -> Text,
        /// Display name.
        name -> Text,
        /// Declared network endpoint.
        endpoint -> Text,
        /// Lifecycle status.
        status -> Text,
        /// RFC 3339 heartbeat timestamp.
        last_heartbeat -> Text,
        /// JSON array of declared data type tags.
        data_types -> Text,
        /// JSON object of free-form metadata.
        metadata -> Text,
    }
}
