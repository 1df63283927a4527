//! Read access to projected rows.

use super::{QueryError, QueryResult};
use crate::packet::{
    domain::{Projection, ProjectionKind},
    ports::ProjectionStore,
};
use std::sync::Arc;
use tracing::debug;

/// Row count returned when the caller does not ask for one.
pub const DEFAULT_PROJECTION_LIMIT: usize = 100;

/// Upper bound on rows returned by a single query.
pub const MAX_PROJECTION_LIMIT: usize = 1000;

/// Serves the most recent projected rows of a given kind.
pub struct ProjectionReader<P>
where
    P: ProjectionStore,
{
    store: Arc<P>,
    default_limit: usize,
}

impl<P> ProjectionReader<P>
where
    P: ProjectionStore,
{
    /// Creates a reader that returns `default_limit` rows when no limit is
    /// requested.
    #[must_use]
    pub fn new(store: Arc<P>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit: default_limit.clamp(1, MAX_PROJECTION_LIMIT),
        }
    }

    /// Returns up to `limit` rows of `kind`, newest first.
    ///
    /// `limit` is clamped to `1..=MAX_PROJECTION_LIMIT`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Store`] when the store cannot be read.
    pub async fn recent(
        &self,
        kind: ProjectionKind,
        limit: Option<usize>,
    ) -> QueryResult<Vec<Projection>> {
        let effective = limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_PROJECTION_LIMIT);
        let rows = self
            .store
            .recent(kind, effective)
            .await
            .map_err(QueryError::from)?;
        debug!(?kind, limit = effective, returned = rows.len(), "projected rows read");
        Ok(rows)
    }
}
