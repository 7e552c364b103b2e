//! Catalog queries: league-season, team-season and single-day fixture lists.

use std::fmt::Debug;

use chrono::NaiveDate;
use log::debug;

use crate::{
    db_types::Fixture,
    mge_api::fixture_objects::FixtureQueryFilter,
    traits::{FixtureApiError, FixtureManagement},
};

pub struct FixtureApi<B> {
    db: B,
}

impl<B: Debug> Debug for FixtureApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FixtureApi ({:?})", self.db)
    }
}

impl<B> FixtureApi<B>
where B: FixtureManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn fixture_by_id(&self, fixture_id: i64) -> Result<Option<Fixture>, FixtureApiError> {
        self.db.fetch_fixture(fixture_id).await
    }

    /// All fixtures of one league-season, newest kickoff first. The usual input to the round grouper.
    pub async fn fixtures_for_league_season(
        &self,
        league_id: i64,
        season: i64,
    ) -> Result<Vec<Fixture>, FixtureApiError> {
        self.search(FixtureQueryFilter::default().with_league(league_id).with_season(season)).await
    }

    /// All fixtures a team played (home or away) in one season, newest kickoff first.
    pub async fn fixtures_for_team_season(&self, team_id: i64, season: i64) -> Result<Vec<Fixture>, FixtureApiError> {
        self.search(FixtureQueryFilter::default().with_team(team_id).with_season(season)).await
    }

    /// All fixtures kicking off on one UTC calendar day. The usual input to the day view.
    pub async fn fixtures_on_day(&self, day: NaiveDate) -> Result<Vec<Fixture>, FixtureApiError> {
        self.search(FixtureQueryFilter::default().on_day(day)).await
    }

    /// Runs a validated catalog query. A filter must constrain at least a team-season, a league-season or a
    /// day; anything less would sweep the whole catalog and is rejected as a query error.
    pub async fn search(&self, query: FixtureQueryFilter) -> Result<Vec<Fixture>, FixtureApiError> {
        let team_season = query.team_id.is_some() && query.season.is_some();
        let league_season = query.league_id.is_some() && query.season.is_some();
        if !team_season && !league_season && query.day.is_none() {
            debug!("🗃️ Rejecting under-constrained fixture query: {query}");
            return Err(FixtureApiError::QueryError(format!("Invalid query. {query}")));
        }
        self.db.search_fixtures(query).await
    }
}
