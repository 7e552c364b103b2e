use serde::{Deserialize, Serialize};

use crate::db_types::Fixture;

/// Which enrichment payloads a fixture carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub statistics: bool,
    pub lineups: bool,
    pub events: bool,
}

impl Completeness {
    pub fn of(fixture: &Fixture) -> Self {
        Self { statistics: fixture.has_statistics(), lineups: fixture.has_lineups(), events: fixture.has_events() }
    }

    pub fn is_complete(&self) -> bool {
        self.statistics && self.lineups && self.events
    }
}

/// An unenriched fixture together with the users tracking it.
///
/// The `tracked_by` list is display-only: it never influences filtering or totals, and it is sorted so the output
/// is deterministic regardless of backend iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncompleteFixture {
    pub fixture: Fixture,
    pub tracked_by: Vec<String>,
}

impl IncompleteFixture {
    pub fn completeness(&self) -> Completeness {
        Completeness::of(&self.fixture)
    }
}
