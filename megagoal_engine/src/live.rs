//! Live-status derivation and the grouped-by-league day view.
//!
//! Whether a fixture is "live" is derived at the moment of asking, never stored: the catalog's status codes are
//! only as fresh as the last ingestion run, so a stored "live" flag would go stale immediately. The day view
//! groups one day's fixtures by league and supports a live-only filter that can always be rolled back to the
//! exact pre-filter view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::ViewConfig,
    db_types::{Fixture, FixtureStatus},
    paging::Reveal,
};

/// Status codes that take a fixture out of the live set no matter what the clock says.
pub const FINISHED_STATUSES: [FixtureStatus; 5] = [
    FixtureStatus::FullTime,
    FixtureStatus::AfterExtraTime,
    FixtureStatus::AfterPenalties,
    FixtureStatus::Postponed,
    FixtureStatus::Cancelled,
];

/// True when the fixture is currently in progress.
///
/// The status code alone is not trusted: a fixture whose feed is lagging may still read `NS` long after kickoff,
/// and a future fixture may carry a stale non-`NS` code. So a fixture is live exactly when its status is not in
/// [`FINISHED_STATUSES`] and its kickoff is not in the future.
pub fn is_live(fixture: &Fixture, now: DateTime<Utc>) -> bool {
    !FINISHED_STATUSES.contains(&fixture.status) && fixture.kickoff <= now.timestamp()
}

/// One league's fixtures within the day view.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueGroup {
    pub league_id: i64,
    pub season: i64,
    pub league_name: String,
    pub fixtures: Vec<Fixture>,
}

/// The visible slice of one league, as handed to the presentation boundary.
#[derive(Debug)]
pub struct VisibleLeague<'a> {
    pub league: &'a LeagueGroup,
    pub matches: &'a [Fixture],
    pub has_more: bool,
}

/// One day's fixtures grouped by (league, season).
///
/// Leagues are ordered by name, with the configured friendly leagues always last; fixtures within a league are
/// ordered by kickoff. The live filter is a point-in-time recomputation: turning it on derives a filtered copy
/// (leagues with no live fixture are dropped entirely), while the unfiltered grouping stays cached so turning it
/// off restores the exact pre-filter content and order without recomputing anything.
#[derive(Debug, Clone)]
pub struct DayView {
    all: Vec<LeagueGroup>,
    reveals: Vec<Reveal>,
    live: Option<Vec<LeagueGroup>>,
    live_reveals: Vec<Reveal>,
    batch: usize,
}

impl DayView {
    pub fn new(fixtures: Vec<Fixture>, config: &ViewConfig) -> Self {
        let mut groups: Vec<LeagueGroup> = Vec::new();
        for fixture in fixtures {
            match groups.iter_mut().find(|g| g.league_id == fixture.league_id && g.season == fixture.season) {
                Some(group) => group.fixtures.push(fixture),
                None => groups.push(LeagueGroup {
                    league_id: fixture.league_id,
                    season: fixture.season,
                    league_name: fixture.league_name.clone(),
                    fixtures: vec![fixture],
                }),
            }
        }

        groups.sort_by(|a, b| {
            let a_friendly = config.friendly_league_ids.contains(&a.league_id);
            let b_friendly = config.friendly_league_ids.contains(&b.league_id);
            a_friendly.cmp(&b_friendly).then_with(|| a.league_name.cmp(&b.league_name))
        });
        for group in &mut groups {
            group.fixtures.sort_by_key(|f| f.kickoff);
        }

        let reveals = vec![Reveal::new(config.daily_batch_size); groups.len()];
        Self { all: groups, reveals, live: None, live_reveals: Vec::new(), batch: config.daily_batch_size }
    }

    pub fn live_only(&self) -> bool {
        self.live.is_some()
    }

    /// Applies or removes the live filter. `now` is only consulted when switching the filter on.
    pub fn set_live_only(&mut self, on: bool, now: DateTime<Utc>) {
        if on {
            let filtered: Vec<LeagueGroup> = self
                .all
                .iter()
                .filter_map(|group| {
                    let live: Vec<Fixture> = group.fixtures.iter().filter(|f| is_live(f, now)).cloned().collect();
                    if live.is_empty() {
                        return None;
                    }
                    Some(LeagueGroup {
                        league_id: group.league_id,
                        season: group.season,
                        league_name: group.league_name.clone(),
                        fixtures: live,
                    })
                })
                .collect();
            self.live_reveals = vec![Reveal::new(self.batch); filtered.len()];
            self.live = Some(filtered);
        } else {
            self.live = None;
            self.live_reveals.clear();
            for reveal in &mut self.reveals {
                reveal.reset();
            }
        }
    }

    pub fn toggle_live(&mut self, now: DateTime<Utc>) {
        self.set_live_only(self.live.is_none(), now);
    }

    /// The league groups currently shown, with each league's visible slice.
    pub fn visible(&self) -> Vec<VisibleLeague<'_>> {
        let (groups, reveals) = match &self.live {
            Some(filtered) => (filtered.as_slice(), self.live_reveals.as_slice()),
            None => (self.all.as_slice(), self.reveals.as_slice()),
        };
        groups
            .iter()
            .zip(reveals.iter())
            .map(|(group, reveal)| VisibleLeague {
                league: group,
                matches: &group.fixtures[..reveal.shown(group.fixtures.len())],
                has_more: reveal.has_more(group.fixtures.len()),
            })
            .collect()
    }

    /// Reveals the next batch for one league in the active (filtered or unfiltered) view.
    pub fn show_more(&mut self, league_id: i64, season: i64) -> bool {
        let (groups, reveals) = match &self.live {
            Some(filtered) => (filtered.as_slice(), self.live_reveals.as_mut_slice()),
            None => (self.all.as_slice(), self.reveals.as_mut_slice()),
        };
        match groups.iter().position(|g| g.league_id == league_id && g.season == season) {
            Some(i) => {
                reveals[i].show_more(groups[i].fixtures.len());
                true
            },
            None => false,
        }
    }

    /// Total fixtures for the day, regardless of any active filter.
    pub fn total_matches(&self) -> usize {
        self.all.iter().map(|g| g.fixtures.len()).sum()
    }

    pub fn league_count(&self) -> usize {
        self.all.len()
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn at(ts: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(ts, 0).unwrap()
    }

    fn fixture(id: i64, league_id: i64, league: &str, kickoff: i64, status: FixtureStatus) -> Fixture {
        Fixture::new(id, kickoff, status).in_league(league_id, league, 2024, "Regular Season - 1")
    }

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn finished_statuses_are_never_live() {
        for status in FINISHED_STATUSES {
            let f = fixture(1, 39, "Premier League", NOW - 7200, status);
            assert!(!is_live(&f, at(NOW)), "{status} should not be live");
        }
    }

    #[test]
    fn future_kickoffs_are_never_live() {
        // Even an in-progress status cannot make a future fixture live
        let f = fixture(1, 39, "Premier League", NOW + 600, FixtureStatus::FirstHalf);
        assert!(!is_live(&f, at(NOW)));
    }

    #[test]
    fn stale_not_started_status_counts_as_live_after_kickoff() {
        let f = fixture(1, 39, "Premier League", NOW - 3600, FixtureStatus::NotStarted);
        assert!(is_live(&f, at(NOW)));
    }

    #[test]
    fn in_progress_statuses_after_kickoff_are_live() {
        for status in [FixtureStatus::FirstHalf, FixtureStatus::HalfTime, FixtureStatus::ExtraTime] {
            let f = fixture(1, 39, "Premier League", NOW - 3600, status);
            assert!(is_live(&f, at(NOW)), "{status} should be live");
        }
    }

    fn sample_day() -> Vec<Fixture> {
        vec![
            fixture(1, 140, "La Liga", NOW - 3600, FixtureStatus::SecondHalf),
            fixture(2, 140, "La Liga", NOW + 7200, FixtureStatus::NotStarted),
            fixture(3, 39, "Premier League", NOW - 7200, FixtureStatus::FullTime),
            fixture(4, 10, "Friendlies", NOW - 1800, FixtureStatus::FirstHalf),
            fixture(5, 39, "Premier League", NOW - 5400, FixtureStatus::FullTime),
        ]
    }

    #[test]
    fn groups_by_league_with_friendlies_last() {
        let view = DayView::new(sample_day(), &ViewConfig::default());
        let names: Vec<&str> = view.visible().iter().map(|v| v.league.league_name.as_str()).collect();
        assert_eq!(names, vec!["La Liga", "Premier League", "Friendlies"]);
        // Within a league, kickoff ascending
        let visible = view.visible();
        let premier = &visible[1];
        assert_eq!(premier.matches[0].fixture_id, 3);
        assert_eq!(premier.matches[1].fixture_id, 5);
    }

    #[test]
    fn live_filter_drops_leagues_with_no_live_fixture() {
        let mut view = DayView::new(sample_day(), &ViewConfig::default());
        view.set_live_only(true, at(NOW));
        let visible = view.visible();
        let names: Vec<&str> = visible.iter().map(|v| v.league.league_name.as_str()).collect();
        // Premier League's matches are all FT, so the league disappears entirely
        assert_eq!(names, vec!["La Liga", "Friendlies"]);
        assert_eq!(visible[0].matches.len(), 1);
        assert_eq!(visible[0].matches[0].fixture_id, 1);
    }

    #[test]
    fn toggling_off_restores_the_cached_view() {
        let mut view = DayView::new(sample_day(), &ViewConfig::default());
        let before: Vec<(i64, Vec<i64>)> = view
            .visible()
            .iter()
            .map(|v| (v.league.league_id, v.matches.iter().map(|f| f.fixture_id).collect()))
            .collect();

        view.toggle_live(at(NOW));
        assert!(view.live_only());
        view.toggle_live(at(NOW));
        assert!(!view.live_only());

        let after: Vec<(i64, Vec<i64>)> = view
            .visible()
            .iter()
            .map(|v| (v.league.league_id, v.matches.iter().map(|f| f.fixture_id).collect()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn per_league_reveal_uses_the_daily_batch() {
        let fixtures: Vec<Fixture> =
            (0..20).map(|i| fixture(i, 140, "La Liga", NOW + i * 60, FixtureStatus::NotStarted)).collect();
        let mut view = DayView::new(fixtures, &ViewConfig::default());

        let visible = view.visible();
        assert_eq!(visible[0].matches.len(), 9);
        assert!(visible[0].has_more);

        assert!(view.show_more(140, 2024));
        assert_eq!(view.visible()[0].matches.len(), 18);
        assert!(view.show_more(140, 2024));
        assert_eq!(view.visible()[0].matches.len(), 20);
        // Exhausted: further calls change nothing
        assert!(view.show_more(140, 2024));
        assert_eq!(view.visible()[0].matches.len(), 20);

        assert!(!view.show_more(39, 2024));
    }

    #[test]
    fn totals_ignore_the_live_filter() {
        let mut view = DayView::new(sample_day(), &ViewConfig::default());
        view.set_live_only(true, at(NOW));
        assert_eq!(view.total_matches(), 5);
        assert_eq!(view.league_count(), 3);
    }
}
