use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Filter for tracking-record queries. Empty fields are not constrained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackedQueryFilter {
    pub username: Option<String>,
    /// Matches records where the team appears at home or away.
    pub team_id: Option<i64>,
    pub season: Option<i64>,
}

impl TrackedQueryFilter {
    pub fn for_user<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_season(mut self, season: i64) -> Self {
        self.season = Some(season);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.team_id.is_none() && self.season.is_none()
    }
}

impl Display for TrackedQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "No filters.")?;
            return Ok(());
        }
        if let Some(username) = &self.username {
            write!(f, "username: {username}. ")?;
        }
        if let Some(team_id) = self.team_id {
            write!(f, "team_id: {team_id}. ")?;
        }
        if let Some(season) = self.season {
            write!(f, "season: {season}. ")?;
        }
        Ok(())
    }
}
