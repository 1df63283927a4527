//! Application services for packet intake and read-side queries.

mod dispatcher;
mod projections;
mod statistics;

pub use dispatcher::{DispatchError, DispatchReceipt, PacketDispatcher, ProjectionOutcome};
pub use projections::{DEFAULT_PROJECTION_LIMIT, MAX_PROJECTION_LIMIT, ProjectionReader};
pub use statistics::{PacketCounts, QueryError, QueryResult, StatisticsAggregator};
