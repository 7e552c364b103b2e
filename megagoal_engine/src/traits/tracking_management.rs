use thiserror::Error;

use crate::{
    db_types::{FixtureTracker, NewTrackedMatch, TrackedMatch},
    mge_api::tracking_objects::TrackedQueryFilter,
};

#[derive(Debug, Clone, Error)]
pub enum TrackingApiError {
    /// The store could not be reached or the call failed mid-flight. Retryable by the caller; never retried here.
    #[error("Tracking store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for TrackingApiError {
    fn from(e: sqlx::Error) -> Self {
        TrackingApiError::StoreUnavailable(e.to_string())
    }
}

/// Access to the per-user tracking records.
///
/// A record is exclusively owned by its username. The mutating methods take the caller's username and key the
/// operation on `(fixture_id, username)`, so a non-owner's call matches nothing rather than failing.
#[allow(async_fn_in_trait)]
pub trait TrackingManagement {
    /// The distinct fixture ids referenced by any tracking record, ascending.
    async fn tracked_fixture_ids(&self) -> Result<Vec<i64>, TrackingApiError>;

    /// All (fixture, username) pairs for the given fixtures, ordered by fixture id then username.
    async fn trackers_for_fixtures(&self, ids: &[i64]) -> Result<Vec<FixtureTracker>, TrackingApiError>;

    /// Inserts a tracking record, or returns the existing one. The second element is `true` when a new record
    /// was inserted.
    async fn insert_tracked_match(&self, record: NewTrackedMatch) -> Result<(TrackedMatch, bool), TrackingApiError>;

    /// Reassigns (or clears) the location of the caller's record. Returns `None` when the caller does not own a
    /// record for this fixture.
    async fn relocate_tracked_match(
        &self,
        fixture_id: i64,
        username: &str,
        location: Option<&str>,
    ) -> Result<Option<TrackedMatch>, TrackingApiError>;

    /// Deletes the caller's record. Returns `false` when the caller does not own a record for this fixture.
    async fn delete_tracked_match(&self, fixture_id: i64, username: &str) -> Result<bool, TrackingApiError>;

    /// Fetches tracking records matching the filter, ordered by kickoff descending.
    async fn search_tracked_matches(&self, query: TrackedQueryFilter) -> Result<Vec<TrackedMatch>, TrackingApiError>;
}
