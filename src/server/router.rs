//! Route table.

use super::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Builds the coordinator router over `state`.
///
/// With `enable_cors` every origin, method and header is allowed.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/status", get(handlers::system_status))
        .route("/api/mcp/register", post(handlers::register_adapter))
        .route("/api/mcp/adapters", get(handlers::adapter_status))
        .route("/api/data/receive", post(handlers::receive_packet))
        .route("/api/data/statistics", get(handlers::packet_counts))
        .route("/api/data/projections/:tag", get(handlers::projected_data))
        .route("/api/manus/data", get(handlers::manus_data))
        .route("/api/trae/data", get(handlers::trae_data))
        .with_state(state);

    let routes = if enable_cors {
        routes.layer(CorsLayer::permissive())
    } else {
        routes
    };
    routes.layer(TraceLayer::new_for_http())
}
