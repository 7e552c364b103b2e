//! Viewer statistics.
//!
//! Aggregations over a user's tracked matches. The caller fetches the user's records once and the aggregation runs
//! in memory; only matches with both goal values recorded participate. All rankings cut off at the top five and
//! break ties deterministically (count descending, then name ascending).

use std::collections::HashMap;

use serde::Serialize;

use crate::db_types::TrackedMatch;

const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonCount {
    pub season: i64,
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamCount {
    pub team_id: i64,
    pub name: String,
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeagueCount {
    pub league_id: i64,
    pub name: String,
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamGoals {
    pub team_id: i64,
    pub name: String,
    pub goals: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationCount {
    pub location: String,
    pub matches: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewerStats {
    pub total_matches: u64,
    pub total_goals: i64,
    pub goals_per_match: f64,
    /// Matches per season, most recent five seasons.
    pub matches_by_season: Vec<SeasonCount>,
    /// Teams watched most often (home and away appearances both count).
    pub favourite_teams: Vec<TeamCount>,
    pub favourite_leagues: Vec<LeagueCount>,
    /// Teams that scored the most goals across the user's matches.
    pub top_goals_teams: Vec<TeamGoals>,
    /// Kickoff of the most recent tracked match, epoch seconds.
    pub last_match: Option<i64>,
}

/// Aggregates a user's tracked matches into [`ViewerStats`].
///
/// Records missing either goal value are excluded from every figure, including the match count.
pub fn viewer_stats(matches: &[TrackedMatch]) -> ViewerStats {
    let scored: Vec<&TrackedMatch> =
        matches.iter().filter(|m| m.home_goals.is_some() && m.away_goals.is_some()).collect();
    if scored.is_empty() {
        return ViewerStats::default();
    }

    let total_matches = scored.len() as u64;
    let total_goals: i64 = scored.iter().map(|m| m.home_goals.unwrap_or(0) + m.away_goals.unwrap_or(0)).sum();
    let goals_per_match = (total_goals as f64 / total_matches as f64 * 10.0).round() / 10.0;

    let mut by_season: HashMap<i64, u64> = HashMap::new();
    let mut team_counts: HashMap<i64, (String, u64)> = HashMap::new();
    let mut league_counts: HashMap<i64, (String, u64)> = HashMap::new();
    let mut team_goals: HashMap<i64, (String, i64)> = HashMap::new();
    for m in &scored {
        *by_season.entry(m.season).or_default() += 1;

        let home = team_counts.entry(m.home_team_id).or_insert_with(|| (m.home_team_name.clone(), 0));
        home.1 += 1;
        let away = team_counts.entry(m.away_team_id).or_insert_with(|| (m.away_team_name.clone(), 0));
        away.1 += 1;

        let league = league_counts.entry(m.league_id).or_insert_with(|| (m.league_name.clone(), 0));
        league.1 += 1;

        let home = team_goals.entry(m.home_team_id).or_insert_with(|| (m.home_team_name.clone(), 0));
        home.1 += m.home_goals.unwrap_or(0);
        let away = team_goals.entry(m.away_team_id).or_insert_with(|| (m.away_team_name.clone(), 0));
        away.1 += m.away_goals.unwrap_or(0);
    }

    let mut matches_by_season: Vec<SeasonCount> =
        by_season.into_iter().map(|(season, matches)| SeasonCount { season, matches }).collect();
    matches_by_season.sort_by(|a, b| b.season.cmp(&a.season));
    matches_by_season.truncate(TOP_N);

    let mut favourite_teams: Vec<TeamCount> =
        team_counts.into_iter().map(|(team_id, (name, matches))| TeamCount { team_id, name, matches }).collect();
    favourite_teams.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.name.cmp(&b.name)));
    favourite_teams.truncate(TOP_N);

    let mut favourite_leagues: Vec<LeagueCount> = league_counts
        .into_iter()
        .map(|(league_id, (name, matches))| LeagueCount { league_id, name, matches })
        .collect();
    favourite_leagues.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.name.cmp(&b.name)));
    favourite_leagues.truncate(TOP_N);

    let mut top_goals_teams: Vec<TeamGoals> =
        team_goals.into_iter().map(|(team_id, (name, goals))| TeamGoals { team_id, name, goals }).collect();
    top_goals_teams.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.name.cmp(&b.name)));
    top_goals_teams.truncate(TOP_N);

    let last_match = scored.iter().map(|m| m.kickoff).max();

    ViewerStats {
        total_matches,
        total_goals,
        goals_per_match,
        matches_by_season,
        favourite_teams,
        favourite_leagues,
        top_goals_teams,
        last_match,
    }
}

/// Tallies how many of the user's matches were watched at each location. Unlocated matches are skipped.
pub fn location_counts(matches: &[TrackedMatch]) -> Vec<LocationCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for m in matches {
        if let Some(location) = &m.location {
            if !location.is_empty() {
                *counts.entry(location.clone()).or_default() += 1;
            }
        }
    }
    let mut result: Vec<LocationCount> =
        counts.into_iter().map(|(location, matches)| LocationCount { location, matches }).collect();
    result.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.location.cmp(&b.location)));
    result
}
