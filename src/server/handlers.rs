//! Request handlers.

use super::{ApiError, AppState, RegisterAdapterPayload, SubmitPacketPayload};
use crate::adapter_registry::{
    domain::AdapterId,
    services::{AdapterStatusView, RegisterAdapterRequest},
};
use crate::packet::{
    domain::{DataPacket, DataType, Projection, ProjectionKind},
    services::{DispatchReceipt, PacketCounts},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Envelope for successful responses.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    data: T,
}

impl<T> Success<T> {
    const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Fields returned after a registration.
#[derive(Debug, Serialize)]
pub struct Registered {
    adapter_id: AdapterId,
}

/// Rows returned by projection queries.
#[derive(Debug, Serialize)]
pub struct ProjectedRows {
    data: Vec<Projection>,
}

/// Optional query string of projection reads.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectionParams {
    limit: Option<usize>,
}

/// Combined coordinator status.
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    adapters: BTreeMap<AdapterId, AdapterStatusView>,
    data_statistics: PacketCounts,
    timestamp: DateTime<Utc>,
}

/// Liveness answer.
#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

/// `POST /api/mcp/register`
pub async fn register_adapter(
    State(state): State<AppState>,
    body: Result<Json<RegisterAdapterPayload>, JsonRejection>,
) -> Result<Json<Success<Registered>>, ApiError> {
    let Json(payload) = body?;
    let request = RegisterAdapterRequest::try_from(payload)?;
    let adapter = state.registry.register(request).await?;
    Ok(Json(Success::new(Registered {
        adapter_id: adapter.id().clone(),
    })))
}

/// `POST /api/data/receive`
pub async fn receive_packet(
    State(state): State<AppState>,
    body: Result<Json<SubmitPacketPayload>, JsonRejection>,
) -> Result<Json<Success<DispatchReceipt>>, ApiError> {
    let Json(payload) = body?;
    let packet = DataPacket::try_from(payload)?;
    let receipt = state.dispatcher.submit(packet).await?;
    Ok(Json(Success::new(receipt)))
}

/// `GET /api/mcp/adapters`
pub async fn adapter_status(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<AdapterId, AdapterStatusView>>, ApiError> {
    Ok(Json(state.registry.status()?))
}

/// `GET /api/data/statistics`
pub async fn packet_counts(State(state): State<AppState>) -> Result<Json<PacketCounts>, ApiError> {
    Ok(Json(state.statistics.counts_by_tag().await?))
}

/// `GET /api/data/projections/:tag`
pub async fn projected_data(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    query: Result<Query<ProjectionParams>, QueryRejection>,
) -> Result<Json<Success<ProjectedRows>>, ApiError> {
    let data_type =
        DataType::try_from(tag.as_str()).map_err(|err| ApiError::validation("tag", err))?;
    let kind = ProjectionKind::try_from(data_type).map_err(|err| ApiError::validation("tag", err))?;
    let Query(params) = query?;
    read_projection(&state, kind, params.limit).await
}

/// `GET /api/manus/data`
pub async fn manus_data(
    State(state): State<AppState>,
    query: Result<Query<ProjectionParams>, QueryRejection>,
) -> Result<Json<Success<ProjectedRows>>, ApiError> {
    let Query(params) = query?;
    read_projection(&state, ProjectionKind::Conversation, params.limit).await
}

/// `GET /api/trae/data`
pub async fn trae_data(
    State(state): State<AppState>,
    query: Result<Query<ProjectionParams>, QueryRejection>,
) -> Result<Json<Success<ProjectedRows>>, ApiError> {
    let Query(params) = query?;
    read_projection(&state, ProjectionKind::CodeInteraction, params.limit).await
}

/// `GET /api/status`
pub async fn system_status(State(state): State<AppState>) -> Result<Json<SystemStatus>, ApiError> {
    let adapters = state.registry.status()?;
    let data_statistics = state.statistics.counts_by_tag().await?;
    Ok(Json(SystemStatus {
        adapters,
        data_statistics,
        timestamp: Utc::now(),
    }))
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    debug!("health check requested");
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn read_projection(
    state: &AppState,
    kind: ProjectionKind,
    limit: Option<usize>,
) -> Result<Json<Success<ProjectedRows>>, ApiError> {
    let data = state.projections.recent(kind, limit).await?;
    Ok(Json(Success::new(ProjectedRows { data })))
}
