//! Tracking-record management on behalf of a user.
//!
//! The username always arrives from upstream identity middleware as an opaque string; it is threaded through to
//! the store untouched and never validated beyond being non-empty.

use std::fmt::Debug;

use log::debug;

use crate::{
    db_types::{NewTrackedMatch, TrackedMatch},
    mge_api::tracking_objects::TrackedQueryFilter,
    traits::{TrackingApiError, TrackingManagement},
};

pub struct TrackingApi<B> {
    db: B,
}

impl<B: Debug> Debug for TrackingApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrackingApi ({:?})", self.db)
    }
}

impl<B> TrackingApi<B>
where B: TrackingManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Records that the user watched a fixture. Idempotent: tracking the same fixture twice returns the existing
    /// record and `false`.
    pub async fn track(&self, record: NewTrackedMatch) -> Result<(TrackedMatch, bool), TrackingApiError> {
        if record.username.is_empty() {
            return Err(TrackingApiError::QueryError("A tracking record needs a username".to_string()));
        }
        let (record, inserted) = self.db.insert_tracked_match(record).await?;
        if inserted {
            debug!("🗃️ Match tracked for fixture {} by {}", record.fixture_id, record.username);
        }
        Ok((record, inserted))
    }

    /// Moves the user's record to a new location (or clears it). Only the owner's record can match; anyone
    /// else gets `None`.
    pub async fn relocate(
        &self,
        fixture_id: i64,
        username: &str,
        location: Option<&str>,
    ) -> Result<Option<TrackedMatch>, TrackingApiError> {
        let updated = self.db.relocate_tracked_match(fixture_id, username, location).await?;
        if updated.is_some() {
            debug!("🗃️ Location updated for fixture {fixture_id} to {location:?}");
        }
        Ok(updated)
    }

    /// Removes the user's record. Returns `false` when the user does not track this fixture.
    pub async fn untrack(&self, fixture_id: i64, username: &str) -> Result<bool, TrackingApiError> {
        let deleted = self.db.delete_tracked_match(fixture_id, username).await?;
        if deleted {
            debug!("🗃️ Match untracked for fixture {fixture_id} by {username}");
        }
        Ok(deleted)
    }

    /// All of one user's tracked matches, newest kickoff first.
    pub async fn matches_for_user(&self, username: &str) -> Result<Vec<TrackedMatch>, TrackingApiError> {
        self.search(TrackedQueryFilter::default().for_user(username)).await
    }

    pub async fn search(&self, query: TrackedQueryFilter) -> Result<Vec<TrackedMatch>, TrackingApiError> {
        self.db.search_tracked_matches(query).await
    }
}
