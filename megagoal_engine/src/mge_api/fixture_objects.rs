use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter for catalog queries. Empty fields are not constrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureQueryFilter {
    pub league_id: Option<i64>,
    pub season: Option<i64>,
    /// Matches fixtures where the team plays at home or away.
    pub team_id: Option<i64>,
    /// Restricts kickoff to one UTC calendar day.
    pub day: Option<NaiveDate>,
}

impl FixtureQueryFilter {
    pub fn with_league(mut self, league_id: i64) -> Self {
        self.league_id = Some(league_id);
        self
    }

    pub fn with_season(mut self, season: i64) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn on_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.league_id.is_none() && self.season.is_none() && self.team_id.is_none() && self.day.is_none()
    }
}

impl Display for FixtureQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "No filters.")?;
            return Ok(());
        }
        if let Some(league_id) = self.league_id {
            write!(f, "league_id: {league_id}. ")?;
        }
        if let Some(season) = self.season {
            write!(f, "season: {season}. ")?;
        }
        if let Some(team_id) = self.team_id {
            write!(f, "team_id: {team_id}. ")?;
        }
        if let Some(day) = self.day {
            write!(f, "day: {day}. ")?;
        }
        Ok(())
    }
}
