//! `SQLite` repository implementation for packets and projections.

use super::{
    models::{CodeInteractionRow, ConversationRow, NewPacketRow},
    schema::{data_packets, manus_data, trae_data},
};
use crate::packet::{
    domain::{
        CodeInteractionRecord, ConversationRecord, DataPacket, DataType, PacketId, Projection,
        ProjectionKind,
    },
    ports::{PacketLog, PacketStoreError, PacketStoreResult, ProjectionStore},
};
use crate::storage::{SqlitePool, StorageError, text_to_timestamp, timestamp_to_text, with_connection};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use std::collections::HashMap;

/// `SQLite`-backed packet log and projection store.
#[derive(Debug, Clone)]
pub struct SqlitePacketStore {
    pool: SqlitePool,
}

impl SqlitePacketStore {
    /// Creates a store over an initialised connection pool.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl From<StorageError> for PacketStoreError {
    fn from(err: StorageError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl PacketLog for SqlitePacketStore {
    async fn append(&self, packet: &DataPacket) -> PacketStoreResult<()> {
        let content =
            serde_json::to_string(packet.content()).map_err(PacketStoreError::persistence)?;
        let row = NewPacketRow {
            id: packet.id().as_str().to_owned(),
            source_mcp: packet.source_mcp().as_str().to_owned(),
            data_type: packet.data_type().as_str().to_owned(),
            content,
            timestamp: timestamp_to_text(packet.timestamp()),
            processed: packet.processed(),
        };

        with_connection(&self.pool, move |connection| {
            diesel::replace_into(data_packets::table)
                .values(&row)
                .execute(connection)
                .map_err(PacketStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn count_by_data_type(&self) -> PacketStoreResult<HashMap<DataType, u64>> {
        with_connection(&self.pool, move |connection| {
            let rows = data_packets::table
                .group_by(data_packets::data_type)
                .select((data_packets::data_type, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(PacketStoreError::persistence)?;

            rows.into_iter()
                .map(|(tag, count)| -> PacketStoreResult<(DataType, u64)> {
                    let data_type = DataType::try_from(tag.as_str())
                        .map_err(PacketStoreError::invalid_persisted_data)?;
                    let total =
                        u64::try_from(count).map_err(PacketStoreError::invalid_persisted_data)?;
                    Ok((data_type, total))
                })
                .collect()
        })
        .await
    }
}

#[async_trait]
impl ProjectionStore for SqlitePacketStore {
    async fn write(&self, projection: &Projection) -> PacketStoreResult<()> {
        match projection {
            Projection::Conversation(record) => {
                let row = conversation_to_row(record)?;
                with_connection(&self.pool, move |connection| {
                    diesel::replace_into(manus_data::table)
                        .values(&row)
                        .execute(connection)
                        .map_err(PacketStoreError::persistence)?;
                    Ok(())
                })
                .await
            }
            Projection::CodeInteraction(record) => {
                let row = code_interaction_to_row(record)?;
                with_connection(&self.pool, move |connection| {
                    diesel::replace_into(trae_data::table)
                        .values(&row)
                        .execute(connection)
                        .map_err(PacketStoreError::persistence)?;
                    Ok(())
                })
                .await
            }
        }
    }

    async fn recent(&self, kind: ProjectionKind, limit: usize) -> PacketStoreResult<Vec<Projection>> {
        let sql_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        with_connection(&self.pool, move |connection| match kind {
            ProjectionKind::Conversation => {
                let rows = manus_data::table
                    .order(manus_data::timestamp.desc())
                    .limit(sql_limit)
                    .select(ConversationRow::as_select())
                    .load::<ConversationRow>(connection)
                    .map_err(PacketStoreError::persistence)?;
                rows.into_iter()
                    .map(|row| row_to_conversation(row).map(Projection::Conversation))
                    .collect()
            }
            ProjectionKind::CodeInteraction => {
                let rows = trae_data::table
                    .order(trae_data::timestamp.desc())
                    .limit(sql_limit)
                    .select(CodeInteractionRow::as_select())
                    .load::<CodeInteractionRow>(connection)
                    .map_err(PacketStoreError::persistence)?;
                rows.into_iter()
                    .map(|row| row_to_code_interaction(row).map(Projection::CodeInteraction))
                    .collect()
            }
        })
        .await
    }

    async fn remove(&self, kind: ProjectionKind, id: &PacketId) -> PacketStoreResult<()> {
        let key = id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            match kind {
                ProjectionKind::Conversation => {
                    diesel::delete(manus_data::table.filter(manus_data::id.eq(&key)))
                        .execute(connection)
                }
                ProjectionKind::CodeInteraction => {
                    diesel::delete(trae_data::table.filter(trae_data::id.eq(&key)))
                        .execute(connection)
                }
            }
            .map_err(PacketStoreError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn conversation_to_row(record: &ConversationRecord) -> PacketStoreResult<ConversationRow> {
    Ok(ConversationRow {
        id: record.packet_id.as_str().to_owned(),
        conversation_id: record.conversation_id.clone(),
        message_type: record.message_type.clone(),
        content: record.content.clone(),
        timestamp: timestamp_to_text(record.timestamp),
        metadata: serde_json::to_string(&record.metadata).map_err(PacketStoreError::persistence)?,
    })
}

fn code_interaction_to_row(record: &CodeInteractionRecord) -> PacketStoreResult<CodeInteractionRow> {
    Ok(CodeInteractionRow {
        id: record.packet_id.as_str().to_owned(),
        session_id: record.session_id.clone(),
        interaction_type: record.interaction_type.clone(),
        code_content: record.code_content.clone(),
        timestamp: timestamp_to_text(record.timestamp),
        metadata: serde_json::to_string(&record.metadata).map_err(PacketStoreError::persistence)?,
    })
}

fn row_to_conversation(row: ConversationRow) -> PacketStoreResult<ConversationRecord> {
    let ConversationRow {
        id,
        conversation_id,
        message_type,
        content,
        timestamp,
        metadata,
    } = row;

    Ok(ConversationRecord {
        packet_id: PacketId::new(id).map_err(PacketStoreError::invalid_persisted_data)?,
        conversation_id,
        message_type,
        content,
        timestamp: text_to_timestamp(&timestamp).map_err(PacketStoreError::invalid_persisted_data)?,
        metadata: serde_json::from_str(&metadata).map_err(PacketStoreError::invalid_persisted_data)?,
    })
}

fn row_to_code_interaction(row: CodeInteractionRow) -> PacketStoreResult<CodeInteractionRecord> {
    let CodeInteractionRow {
        id,
        session_id,
        interaction_type,
        code_content,
        timestamp,
        metadata,
    } = row;

    Ok(CodeInteractionRecord {
        packet_id: PacketId::new(id).map_err(PacketStoreError::invalid_persisted_data)?,
        session_id,
        interaction_type,
        code_content,
        timestamp: text_to_timestamp(&timestamp).map_err(PacketStoreError::invalid_persisted_data)?,
        metadata: serde_json::from_str(&metadata).map_err(PacketStoreError::invalid_persisted_data)?,
    })
}
