//! `SQLite` repository implementation for registered adapters.

use super::{models::AdapterRow, schema::mcp_adapters};
use crate::adapter_registry::{
    domain::{AdapterId, AdapterStatus, McpAdapter, PersistedAdapterData},
    ports::{AdapterStore, AdapterStoreError, AdapterStoreResult},
};
use crate::packet::domain::DataType;
use crate::storage::{SqlitePool, StorageError, text_to_timestamp, timestamp_to_text, with_connection};
use async_trait::async_trait;
use diesel::prelude::*;
use serde_json::{Map, Value};

/// `SQLite`-backed adapter store.
#[derive(Debug, Clone)]
pub struct SqliteAdapterStore {
    pool: SqlitePool,
}

impl SqliteAdapterStore {
    /// Creates a store over an initialised connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl From<StorageError> for AdapterStoreError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl AdapterStore for SqliteAdapterStore {
    async fn upsert(&self, adapter: &McpAdapter) -> AdapterStoreResult<()> {
        let row = to_row(adapter)?;
        with_connection(&self.pool, move |connection| {
            diesel::replace_into(mcp_adapters::table)
                .values(&row)
                .execute(connection)
                .map_err(AdapterStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, id: &AdapterId) -> AdapterStoreResult<Option<McpAdapter>> {
        let key = id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = mcp_adapters::table
                .filter(mcp_adapters::id.eq(&key))
                .select(AdapterRow::as_select())
                .first::<AdapterRow>(connection)
                .optional()
                .map_err(AdapterStoreError::persistence)?;
            row.map(row_to_adapter).transpose()
        })
        .await
    }

    async fn list_all(&self) -> AdapterStoreResult<Vec<McpAdapter>> {
        with_connection(&self.pool, move |connection| {
            let rows = mcp_adapters::table
                .order(mcp_adapters::id.asc())
                .select(AdapterRow::as_select())
                .load::<AdapterRow>(connection)
                .map_err(AdapterStoreError::persistence)?;
            rows.into_iter().map(row_to_adapter).collect()
        })
        .await
    }
}

fn to_row(adapter: &McpAdapter) -> AdapterStoreResult<AdapterRow> {
    let tags: Vec<&str> = adapter.data_types().iter().map(|tag| tag.as_str()).collect();
    let data_types = serde_json::to_string(&tags).map_err(AdapterStoreError::persistence)?;
    let metadata =
        serde_json::to_string(adapter.metadata()).map_err(AdapterStoreError::persistence)?;

    Ok(AdapterRow {
        id: adapter.id().as_str().to_owned(),
        name: adapter.name().to_owned(),
        endpoint: adapter.endpoint().to_owned(),
        status: adapter.status().as_str().to_owned(),
        last_heartbeat: timestamp_to_text(adapter.last_heartbeat()),
        data_types,
        metadata,
    })
}

fn row_to_adapter(row: AdapterRow) -> AdapterStoreResult<McpAdapter> {
    let AdapterRow {
        id,
        name,
        endpoint,
        status,
        last_heartbeat,
        data_types,
        metadata,
    } = row;

    let parsed_id = AdapterId::new(id).map_err(AdapterStoreError::invalid_persisted_data)?;
    let parsed_status = AdapterStatus::try_from(status.as_str())
        .map_err(AdapterStoreError::invalid_persisted_data)?;
    let parsed_heartbeat =
        text_to_timestamp(&last_heartbeat).map_err(AdapterStoreError::invalid_persisted_data)?;
    let raw_tags: Vec<String> =
        serde_json::from_str(&data_types).map_err(AdapterStoreError::invalid_persisted_data)?;
    let parsed_tags = raw_tags
        .iter()
        .map(|tag| DataType::try_from(tag.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(AdapterStoreError::invalid_persisted_data)?;
    let parsed_metadata: Map<String, Value> =
        serde_json::from_str(&metadata).map_err(AdapterStoreError::invalid_persisted_data)?;

    Ok(McpAdapter::from_persisted(PersistedAdapterData {
        id: parsed_id,
        name,
        endpoint,
        status: parsed_status,
        last_heartbeat: parsed_heartbeat,
        data_types: parsed_tags,
        metadata: parsed_metadata,
    }))
}
