use thiserror::Error;

use crate::{db_types::Fixture, mge_api::fixture_objects::FixtureQueryFilter};

#[derive(Debug, Clone, Error)]
pub enum FixtureApiError {
    /// The store could not be reached or the read failed mid-flight. Retryable by the caller; never retried here.
    #[error("Fixture store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for FixtureApiError {
    fn from(e: sqlx::Error) -> Self {
        FixtureApiError::StoreUnavailable(e.to_string())
    }
}

/// Read access to the canonical fixture catalog.
///
/// Implementations must apply the shared "missing enrichment" rule: a field counts as missing when it is absent,
/// null, or an empty array - the same three-way predicate for all three enrichment fields, combined with AND.
#[allow(async_fn_in_trait)]
pub trait FixtureManagement {
    /// Fetches a single fixture by its provider-assigned id. `None` if the catalog has no such fixture.
    async fn fetch_fixture(&self, fixture_id: i64) -> Result<Option<Fixture>, FixtureApiError>;

    /// Fetches fixtures matching the filter, ordered by kickoff descending.
    async fn search_fixtures(&self, query: FixtureQueryFilter) -> Result<Vec<Fixture>, FixtureApiError>;

    /// Fetches one page of the fixtures among `ids` whose statistics, lineups and events are all missing,
    /// ordered by kickoff descending.
    async fn fetch_unenriched_fixtures(
        &self,
        ids: &[i64],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Fixture>, FixtureApiError>;

    /// Counts the fixtures among `ids` whose enrichment is entirely missing. The count depends only on the
    /// catalog, never on how many users track a fixture.
    async fn count_unenriched_fixtures(&self, ids: &[i64]) -> Result<i64, FixtureApiError>;
}
