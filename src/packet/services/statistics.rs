//! Read-side packet counts.

use crate::packet::{
    domain::DataType,
    ports::{PacketLog, PacketStoreError},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned by read-side packet queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The store failed to answer.
    #[error(transparent)]
    Store(#[from] PacketStoreError),
}

/// Result type for read-side packet queries.
pub type QueryResult<T> = Result<T, QueryError>;

/// All-time packet counts for every tag, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PacketCounts(BTreeMap<DataType, u64>);

impl PacketCounts {
    /// Returns the count for `data_type`.
    #[must_use]
    pub fn get(&self, data_type: DataType) -> u64 {
        self.0.get(&data_type).copied().unwrap_or(0)
    }

    /// Returns the number of logged packets across all tags.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterates over `(tag, count)` pairs in tag declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (DataType, u64)> + '_ {
        self.0.iter().map(|(tag, count)| (*tag, *count))
    }
}

/// Answers count queries against the generic packet log.
pub struct StatisticsAggregator<L>
where
    L: PacketLog,
{
    log: Arc<L>,
}

impl<L> StatisticsAggregator<L>
where
    L: PacketLog,
{
    /// Creates an aggregator over the given log.
    #[must_use]
    pub const fn new(log: Arc<L>) -> Self {
        Self { log }
    }

    /// Counts logged packets per tag, querying the log afresh each call.
    ///
    /// Every tag in [`DataType::ALL`] is present in the result.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Store`] when the log cannot be read.
    pub async fn counts_by_tag(&self) -> QueryResult<PacketCounts> {
        let grouped = self.log.count_by_data_type().await?;
        let counts = DataType::ALL
            .into_iter()
            .map(|tag| (tag, grouped.get(&tag).copied().unwrap_or(0)))
            .collect::<BTreeMap<_, _>>();
        debug!(?counts, "packet counts computed");
        Ok(PacketCounts(counts))
    }
}
