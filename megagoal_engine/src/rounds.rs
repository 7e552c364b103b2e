//! Round grouping for a league-season's fixtures.
//!
//! Fixtures are bucketed by their verbatim round label. Numbered regular-season rounds come first, sorted by their
//! numeric suffix; every other label (knockout rounds, group stages, malformed labels) follows, ordered by the
//! earliest kickoff inside the group so the output never depends on store iteration order. The "current" round is
//! the last numbered round that already contains a full-time result.

use std::collections::HashMap;

use serde::Serialize;

use crate::{
    config::ViewConfig,
    db_types::{Fixture, FixtureStatus},
    helpers::{display_round_name, regular_season_number},
    paging::Reveal,
};

/// All fixtures sharing one round label. Input order of the fixtures is preserved.
#[derive(Debug, Clone, Serialize)]
pub struct RoundGroup {
    pub label: String,
    pub fixtures: Vec<Fixture>,
}

impl RoundGroup {
    /// The label as shown to users, e.g. "Regular Season - 12" becomes "Round - 12". Grouping and ordering always
    /// use the verbatim label; only the display changes.
    pub fn display_name(&self) -> String {
        display_round_name(&self.label)
    }
}

/// The ordered round partition of a league-season, plus the index of the current round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedRounds {
    pub groups: Vec<RoundGroup>,
    pub current_round: usize,
}

/// Partitions `fixtures` into ordered round groups.
///
/// Every fixture lands in exactly one group. The current round is found by scanning the numbered regular-season
/// groups backwards for the first one containing a fixture with status `FT`; if none qualifies the index is 0.
/// Only `FT` triggers the scan - a round decided entirely after extra time or penalties does not.
pub fn group_by_round(fixtures: Vec<Fixture>) -> GroupedRounds {
    let mut labels: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<Fixture>> = HashMap::new();
    for fixture in fixtures {
        let bucket = buckets.entry(fixture.round.clone()).or_default();
        if bucket.is_empty() {
            labels.push(fixture.round.clone());
        }
        bucket.push(fixture);
    }

    let mut numbered: Vec<(u32, String)> = Vec::new();
    let mut other: Vec<String> = Vec::new();
    for label in labels {
        match regular_season_number(&label) {
            Some(n) => numbered.push((n, label)),
            None => other.push(label),
        }
    }
    numbered.sort_by_key(|(n, _)| *n);

    let earliest_kickoff = |label: &String| buckets[label].iter().map(|f| f.kickoff).min().unwrap_or(i64::MAX);
    other.sort_by(|a, b| earliest_kickoff(a).cmp(&earliest_kickoff(b)).then_with(|| a.cmp(b)));

    let numbered_count = numbered.len();
    let mut groups = Vec::with_capacity(numbered_count + other.len());
    for (_, label) in numbered {
        let fixtures = buckets.remove(&label).unwrap_or_default();
        groups.push(RoundGroup { label, fixtures });
    }
    for label in other {
        let fixtures = buckets.remove(&label).unwrap_or_default();
        groups.push(RoundGroup { label, fixtures });
    }

    let mut current_round = 0;
    for i in (0..numbered_count).rev() {
        if groups[i].fixtures.iter().any(|f| f.status == FixtureStatus::FullTime) {
            current_round = i;
            break;
        }
    }

    GroupedRounds { groups, current_round }
}

/// Browsing state over a league-season's grouped rounds.
///
/// Tracks the selected round (starting at the current one) and an incremental reveal of its matches. Changing
/// rounds resets the reveal to a single batch. The grouped fixtures are never re-sorted while the view is alive.
#[derive(Debug, Clone)]
pub struct RoundView {
    rounds: GroupedRounds,
    selected: usize,
    reveal: Reveal,
}

impl RoundView {
    pub fn new(fixtures: Vec<Fixture>, config: &ViewConfig) -> Self {
        let rounds = group_by_round(fixtures);
        let selected = rounds.current_round;
        Self { rounds, selected, reveal: Reveal::new(config.round_batch_size) }
    }

    pub fn rounds(&self) -> &GroupedRounds {
        &self.rounds
    }

    pub fn groups(&self) -> &[RoundGroup] {
        &self.rounds.groups
    }

    pub fn selected_round(&self) -> usize {
        self.selected
    }

    pub fn selected_group(&self) -> Option<&RoundGroup> {
        self.rounds.groups.get(self.selected)
    }

    /// Moves the selection by `step` rounds. Returns false (and changes nothing) when the target is out of range.
    pub fn change_round(&mut self, step: i64) -> bool {
        let target = self.selected as i64 + step;
        if target < 0 || target >= self.rounds.groups.len() as i64 {
            return false;
        }
        self.selected = target as usize;
        self.reveal.reset();
        true
    }

    /// Jumps straight to a round index, e.g. from a round selector.
    pub fn select_round(&mut self, index: usize) -> bool {
        if index >= self.rounds.groups.len() {
            return false;
        }
        self.selected = index;
        self.reveal.reset();
        true
    }

    pub fn visible_matches(&self) -> &[Fixture] {
        match self.selected_group() {
            Some(group) => &group.fixtures[..self.reveal.shown(group.fixtures.len())],
            None => &[],
        }
    }

    pub fn show_more(&mut self) {
        let total = self.selected_group().map(|g| g.fixtures.len()).unwrap_or(0);
        self.reveal.show_more(total);
    }

    pub fn has_more(&self) -> bool {
        let total = self.selected_group().map(|g| g.fixtures.len()).unwrap_or(0);
        self.reveal.has_more(total)
    }
}
