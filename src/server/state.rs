//! Shared handler state.

use crate::adapter_registry::{adapters::sqlite::SqliteAdapterStore, services::AdapterRegistry};
use crate::config::CoordinatorConfig;
use crate::packet::{
    adapters::sqlite::SqlitePacketStore,
    services::{PacketDispatcher, ProjectionReader, StatisticsAggregator},
};
use crate::storage::SqlitePool;
use mockable::DefaultClock;
use std::sync::Arc;

/// Registry type served over HTTP.
pub type CoordinatorRegistry = AdapterRegistry<SqliteAdapterStore, DefaultClock>;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Adapter registration and status.
    pub registry: Arc<CoordinatorRegistry>,
    /// Packet intake.
    pub dispatcher: Arc<PacketDispatcher<SqlitePacketStore, SqlitePacketStore>>,
    /// Packet counts.
    pub statistics: Arc<StatisticsAggregator<SqlitePacketStore>>,
    /// Projected row reads.
    pub projections: Arc<ProjectionReader<SqlitePacketStore>>,
}

impl AppState {
    /// Wires every service over one `SQLite` pool.
    #[must_use]
    pub fn from_pool(pool: SqlitePool, config: &CoordinatorConfig) -> Self {
        let adapter_store = Arc::new(SqliteAdapterStore::new(pool.clone()));
        let packet_store = Arc::new(SqlitePacketStore::new(pool));

        Self {
            registry: Arc::new(AdapterRegistry::new(adapter_store, Arc::new(DefaultClock))),
            dispatcher: Arc::new(PacketDispatcher::new(
                Arc::clone(&packet_store),
                Arc::clone(&packet_store),
            )),
            statistics: Arc::new(StatisticsAggregator::new(Arc::clone(&packet_store))),
            projections: Arc::new(ProjectionReader::new(
                packet_store,
                config.query.projection_limit,
            )),
        }
    }
}
