//! Joins the fixture catalog against the tracking records to find tracked fixtures whose enrichment is missing.

use std::{collections::HashMap, fmt::Debug};

use log::debug;

use crate::{
    mge_api::{completeness_objects::IncompleteFixture, errors::CompletenessApiError},
    paging::PagedResult,
    traits::{FixtureManagement, TrackingManagement},
};

/// Fixed page size of [`CompletenessApi::resolve_incomplete`].
pub const INCOMPLETE_PAGE_SIZE: u32 = 50;

/// The completeness resolver. Requires a backend that can read both stores.
pub struct CompletenessApi<B> {
    db: B,
}

impl<B: Debug> Debug for CompletenessApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompletenessApi ({:?})", self.db)
    }
}

impl<B> CompletenessApi<B>
where B: FixtureManagement + TrackingManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Returns one page of tracked fixtures whose statistics, lineups and events are all missing, newest kickoff
    /// first, each annotated with the usernames tracking it.
    ///
    /// A page below 1 is treated as page 1; a page beyond the range yields empty items with the correct totals.
    /// When no fixture is tracked at all, the catalog is not queried and an empty page is returned immediately.
    ///
    /// The candidate-id read, the page fetch, the count and the username lookup are separate store round-trips
    /// with no transactional isolation: a tracking record inserted while the page is being assembled may or may
    /// not appear in the annotations. That staleness is acceptable - the total is computed from the catalog
    /// filter alone and is never affected by tracker multiplicity.
    pub async fn resolve_incomplete(
        &self,
        page: u32,
    ) -> Result<PagedResult<IncompleteFixture>, CompletenessApiError> {
        let page = page.max(1);
        let tracked_ids = self.db.tracked_fixture_ids().await?;
        if tracked_ids.is_empty() {
            debug!("🗃️ No tracked fixtures, skipping the catalog query");
            return Ok(PagedResult::empty(page));
        }

        let total = self.db.count_unenriched_fixtures(&tracked_ids).await?.max(0) as u64;
        let limit = i64::from(INCOMPLETE_PAGE_SIZE);
        let offset = i64::from(page - 1) * limit;
        let fixtures = self.db.fetch_unenriched_fixtures(&tracked_ids, limit, offset).await?;

        let page_ids: Vec<i64> = fixtures.iter().map(|f| f.fixture_id).collect();
        let trackers =
            if page_ids.is_empty() { Vec::new() } else { self.db.trackers_for_fixtures(&page_ids).await? };
        let mut by_fixture: HashMap<i64, Vec<String>> = HashMap::new();
        for tracker in trackers {
            by_fixture.entry(tracker.fixture_id).or_default().push(tracker.username);
        }

        let items: Vec<IncompleteFixture> = fixtures
            .into_iter()
            .map(|fixture| {
                let mut tracked_by = by_fixture.remove(&fixture.fixture_id).unwrap_or_default();
                tracked_by.sort();
                IncompleteFixture { fixture, tracked_by }
            })
            .collect();
        debug!("🗃️ Resolved {} incomplete fixtures on page {page} of {total} total", items.len());
        Ok(PagedResult::new(items, total, page, INCOMPLETE_PAGE_SIZE))
    }
}
