//! `SqliteDatabase` is a concrete implementation of a match-engine backend.
//!
//! Unsurprisingly, it uses SQLite and implements the store traits defined in the [`crate::traits`] module.
use std::fmt::Debug;

use log::debug;
use sqlx::SqlitePool;

use super::db::{db_url, fixtures, new_pool, tracking};
use crate::{
    db_types::{Fixture, FixtureTracker, NewTrackedMatch, TrackedMatch},
    mge_api::{fixture_objects::FixtureQueryFilter, tracking_objects::TrackedQueryFilter},
    traits::{FixtureApiError, FixtureManagement, TrackingApiError, TrackingManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connects to the database named by `MEGAGOAL_DATABASE_URL` (or the default path).
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Loads catalog entries, replacing any that already exist. This is the seam the out-of-band ingestion and
    /// enrichment jobs write through; the engine's own operations never mutate the catalog.
    pub async fn upsert_fixtures(&self, fixtures: &[Fixture]) -> Result<(), FixtureApiError> {
        let mut conn = self.pool.acquire().await?;
        for fixture in fixtures {
            fixtures::upsert_fixture(fixture, &mut conn).await?;
        }
        debug!("🗃️ Upserted {} fixtures into the catalog", fixtures.len());
        Ok(())
    }
}

impl FixtureManagement for SqliteDatabase {
    async fn fetch_fixture(&self, fixture_id: i64) -> Result<Option<Fixture>, FixtureApiError> {
        let mut conn = self.pool.acquire().await?;
        let fixture = fixtures::fetch_fixture(fixture_id, &mut conn).await?;
        Ok(fixture)
    }

    async fn search_fixtures(&self, query: FixtureQueryFilter) -> Result<Vec<Fixture>, FixtureApiError> {
        let mut conn = self.pool.acquire().await?;
        let fixtures = fixtures::search_fixtures(query, &mut conn).await?;
        Ok(fixtures)
    }

    async fn fetch_unenriched_fixtures(
        &self,
        ids: &[i64],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Fixture>, FixtureApiError> {
        let mut conn = self.pool.acquire().await?;
        let fixtures = fixtures::fetch_unenriched(ids, limit, offset, &mut conn).await?;
        Ok(fixtures)
    }

    async fn count_unenriched_fixtures(&self, ids: &[i64]) -> Result<i64, FixtureApiError> {
        let mut conn = self.pool.acquire().await?;
        let count = fixtures::count_unenriched(ids, &mut conn).await?;
        Ok(count)
    }
}

impl TrackingManagement for SqliteDatabase {
    async fn tracked_fixture_ids(&self) -> Result<Vec<i64>, TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let ids = tracking::distinct_tracked_fixture_ids(&mut conn).await?;
        Ok(ids)
    }

    async fn trackers_for_fixtures(&self, ids: &[i64]) -> Result<Vec<FixtureTracker>, TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let trackers = tracking::trackers_for_fixtures(ids, &mut conn).await?;
        Ok(trackers)
    }

    async fn insert_tracked_match(&self, record: NewTrackedMatch) -> Result<(TrackedMatch, bool), TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let inserted = tracking::idempotent_insert(record, &mut conn).await?;
        Ok(inserted)
    }

    async fn relocate_tracked_match(
        &self,
        fixture_id: i64,
        username: &str,
        location: Option<&str>,
    ) -> Result<Option<TrackedMatch>, TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let record = tracking::relocate(fixture_id, username, location, &mut conn).await?;
        Ok(record)
    }

    async fn delete_tracked_match(&self, fixture_id: i64, username: &str) -> Result<bool, TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = tracking::delete(fixture_id, username, &mut conn).await?;
        Ok(deleted)
    }

    async fn search_tracked_matches(&self, query: TrackedQueryFilter) -> Result<Vec<TrackedMatch>, TrackingApiError> {
        let mut conn = self.pool.acquire().await?;
        let records = tracking::search_tracked_matches(query, &mut conn).await?;
        Ok(records)
    }
}
