//! Packet intake and tag-directed projection.
//!
//! [`PacketDispatcher::submit`] records the packet in the generic log and
//! then derives a tag-specific projection. Only the log write can fail the
//! submission; projection failures are logged and surfaced in the receipt.
//! A packet id reused under another tag has its rows in the other projection
//! stores deleted, so each id is projected by at most one store.
//! The two writes share no transaction, so a packet may be logged without
//! its projection.

use crate::packet::{
    domain::{
        CodeInteractionRecord, ConversationRecord, DataPacket, DataType, PacketId, Projection,
        ProjectionKind,
    },
    ports::{PacketLog, PacketStoreError, ProjectionStore},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// What happened to the tag-specific side of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProjectionOutcome {
    /// The projected row was written.
    Stored {
        /// Store that received the row.
        kind: ProjectionKind,
    },
    /// The tag has no projection store.
    NotApplicable,
    /// The projection write failed; the packet is still logged.
    Failed {
        /// Store that rejected the row.
        kind: ProjectionKind,
        /// Failure description.
        reason: String,
    },
}

/// Receipt returned for an accepted packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReceipt {
    /// Id of the accepted packet.
    pub packet_id: PacketId,
    /// Packet tag.
    pub data_type: DataType,
    /// Result of the projection step.
    pub projection: ProjectionOutcome,
}

/// Errors that fail a submission.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The generic log write failed; nothing was projected.
    #[error(transparent)]
    Log(#[from] PacketStoreError),
}

/// Routes submitted packets to the generic log and their projection store.
pub struct PacketDispatcher<L, P>
where
    L: PacketLog,
    P: ProjectionStore,
{
    log: Arc<L>,
    projections: Arc<P>,
}

impl<L, P> Clone for PacketDispatcher<L, P>
where
    L: PacketLog,
    P: ProjectionStore,
{
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            projections: Arc::clone(&self.projections),
        }
    }
}

impl<L, P> PacketDispatcher<L, P>
where
    L: PacketLog,
    P: ProjectionStore,
{
    /// Creates a dispatcher over the given stores.
    #[must_use]
    pub const fn new(log: Arc<L>, projections: Arc<P>) -> Self {
        Self { log, projections }
    }

    /// Accepts a packet.
    ///
    /// Returns once the generic log write and the projection attempt have
    /// both completed, so sequential calls persist in call order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Log`] when the generic log write fails.
    pub async fn submit(&self, packet: DataPacket) -> Result<DispatchReceipt, DispatchError> {
        if let Err(err) = self.log.append(&packet).await {
            error!(packet_id = %packet.id(), error = %err, "failed to log data packet");
            return Err(err.into());
        }

        let projection = match packet.data_type() {
            DataType::ManusConversation => {
                self.project(Projection::Conversation(ConversationRecord::from_packet(&packet)))
                    .await
            }
            DataType::TraeCodeInteraction => {
                self.project(Projection::CodeInteraction(CodeInteractionRecord::from_packet(
                    &packet,
                )))
                .await
            }
            DataType::CloudEdgeData | DataType::InteractionLog | DataType::RlSrtData => {
                info!(
                    packet_id = %packet.id(),
                    data_type = %packet.data_type(),
                    "no projection for data type"
                );
                ProjectionOutcome::NotApplicable
            }
        };
        self.clear_other_projections(&packet).await;

        info!(
            packet_id = %packet.id(),
            source_mcp = %packet.source_mcp(),
            data_type = %packet.data_type(),
            "data packet received"
        );

        Ok(DispatchReceipt {
            packet_id: packet.id().clone(),
            data_type: packet.data_type(),
            projection,
        })
    }

    async fn clear_other_projections(&self, packet: &DataPacket) {
        let current = packet.data_type().projection_kind();
        for kind in ProjectionKind::ALL {
            if Some(kind) == current {
                continue;
            }
            if let Err(err) = self.projections.remove(kind, packet.id()).await {
                warn!(
                    packet_id = %packet.id(),
                    ?kind,
                    error = %err,
                    "failed to clear projection left by an earlier packet with this id"
                );
            }
        }
    }

    async fn project(&self, projection: Projection) -> ProjectionOutcome {
        let kind = projection.kind();
        match self.projections.write(&projection).await {
            Ok(()) => {
                info!(packet_id = %projection.packet_id(), ?kind, "projection stored");
                ProjectionOutcome::Stored { kind }
            }
            Err(err) => {
                warn!(
                    packet_id = %projection.packet_id(),
                    ?kind,
                    error = %err,
                    "projection write failed; packet remains in the generic log"
                );
                ProjectionOutcome::Failed {
                    kind,
                    reason: err.to_string(),
                }
            }
        }
    }
}
