//! Diesel row models for adapter persistence.

use super::schema::mcp_adapters;
use diesel::prelude::*;

/// Row shape shared by reads and writes of the `mcp_adapters` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = mcp_adapters)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AdapterRow {
    /// Adapter identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared network endpoint.
    pub endpoint: String,
    /// Lifecycle status.
    pub status: String,
    /// RFC 3339 heartbeat timestamp.
    pub last_heartbeat: String,
    /// JSON array of declared data type tags.
    pub data_types: String,
    /// JSON object of free-form metadata.
    pub metadata: String,
}
