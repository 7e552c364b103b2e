use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use thiserror::Error;

//--------------------------------------    FixtureStatus    ---------------------------------------------------------

/// The short status code assigned to a fixture by the external data provider.
///
/// The code is a snapshot: fixture documents are not re-pushed continuously, so a stored status may lag reality.
/// Derived views must therefore never trust the code alone (see [`crate::live::is_live`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixtureStatus {
    /// `NS` - Not started
    #[serde(rename = "NS")]
    NotStarted,
    /// `TBD` - Kickoff time to be defined
    #[serde(rename = "TBD")]
    TimeToBeDefined,
    /// `1H` - First half in progress
    #[serde(rename = "1H")]
    FirstHalf,
    /// `HT` - Half time
    #[serde(rename = "HT")]
    HalfTime,
    /// `2H` - Second half in progress
    #[serde(rename = "2H")]
    SecondHalf,
    /// `ET` - Extra time in progress
    #[serde(rename = "ET")]
    ExtraTime,
    /// `BT` - Break before extra time
    #[serde(rename = "BT")]
    BreakTime,
    /// `P` - Penalty shootout in progress
    #[serde(rename = "P")]
    Penalties,
    /// `INT` - Interrupted
    #[serde(rename = "INT")]
    Interrupted,
    /// `FT` - Finished after 90 minutes
    #[serde(rename = "FT")]
    FullTime,
    /// `AET` - Finished after extra time
    #[serde(rename = "AET")]
    AfterExtraTime,
    /// `PEN` - Finished after a penalty shootout
    #[serde(rename = "PEN")]
    AfterPenalties,
    /// `PST` - Postponed
    #[serde(rename = "PST")]
    Postponed,
    /// `CANC` - Cancelled
    #[serde(rename = "CANC")]
    Cancelled,
    /// `SUSP` - Suspended
    #[serde(rename = "SUSP")]
    Suspended,
    /// `ABD` - Abandoned
    #[serde(rename = "ABD")]
    Abandoned,
    /// `AWD` - Technical loss / awarded result
    #[serde(rename = "AWD")]
    Awarded,
    /// `WO` - Walkover
    #[serde(rename = "WO")]
    Walkover,
}

impl Display for FixtureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            FixtureStatus::NotStarted => "NS",
            FixtureStatus::TimeToBeDefined => "TBD",
            FixtureStatus::FirstHalf => "1H",
            FixtureStatus::HalfTime => "HT",
            FixtureStatus::SecondHalf => "2H",
            FixtureStatus::ExtraTime => "ET",
            FixtureStatus::BreakTime => "BT",
            FixtureStatus::Penalties => "P",
            FixtureStatus::Interrupted => "INT",
            FixtureStatus::FullTime => "FT",
            FixtureStatus::AfterExtraTime => "AET",
            FixtureStatus::AfterPenalties => "PEN",
            FixtureStatus::Postponed => "PST",
            FixtureStatus::Cancelled => "CANC",
            FixtureStatus::Suspended => "SUSP",
            FixtureStatus::Abandoned => "ABD",
            FixtureStatus::Awarded => "AWD",
            FixtureStatus::Walkover => "WO",
        };
        write!(f, "{code}")
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid fixture status: {0}")]
pub struct ConversionError(String);

impl FromStr for FixtureStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NS" => Ok(Self::NotStarted),
            "TBD" => Ok(Self::TimeToBeDefined),
            "1H" => Ok(Self::FirstHalf),
            "HT" => Ok(Self::HalfTime),
            "2H" => Ok(Self::SecondHalf),
            "ET" => Ok(Self::ExtraTime),
            "BT" => Ok(Self::BreakTime),
            "P" => Ok(Self::Penalties),
            "INT" => Ok(Self::Interrupted),
            "FT" => Ok(Self::FullTime),
            "AET" => Ok(Self::AfterExtraTime),
            "PEN" => Ok(Self::AfterPenalties),
            "PST" => Ok(Self::Postponed),
            "CANC" => Ok(Self::Cancelled),
            "SUSP" => Ok(Self::Suspended),
            "ABD" => Ok(Self::Abandoned),
            "AWD" => Ok(Self::Awarded),
            "WO" => Ok(Self::Walkover),
            s => Err(ConversionError(format!("Invalid fixture status: {s}"))),
        }
    }
}

impl From<String> for FixtureStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Unknown fixture status code: {value}. Defaulting to NS");
            FixtureStatus::NotStarted
        })
    }
}

//--------------------------------------       Fixture       ---------------------------------------------------------

/// A single scheduled or played match from the canonical fixture catalog.
///
/// Fixtures are created by the out-of-band ingestion jobs and updated by the enrichment jobs; this engine only ever
/// reads them. The three enrichment payloads (`statistics`, `lineups`, `events`) are either missing or complete -
/// there is no valid partially-populated state to preserve, only to detect (see [`enrichment_present`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture_id: i64,
    /// Kickoff time, epoch seconds, as supplied by the data provider.
    pub kickoff: i64,
    pub status: FixtureStatus,
    pub league_id: i64,
    pub league_name: String,
    pub season: i64,
    /// Free-text round label, e.g. "Regular Season - 12" or "Final". Stored verbatim.
    pub round: String,
    pub home_team_id: i64,
    pub home_team_name: String,
    pub away_team_id: i64,
    pub away_team_name: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub statistics: Option<Value>,
    pub lineups: Option<Value>,
    pub events: Option<Value>,
}

impl Fixture {
    pub fn new(fixture_id: i64, kickoff: i64, status: FixtureStatus) -> Self {
        Self {
            fixture_id,
            kickoff,
            status,
            league_id: 0,
            league_name: String::new(),
            season: 0,
            round: String::new(),
            home_team_id: 0,
            home_team_name: String::new(),
            away_team_id: 0,
            away_team_name: String::new(),
            home_goals: None,
            away_goals: None,
            statistics: None,
            lineups: None,
            events: None,
        }
    }

    pub fn in_league<S: Into<String>, R: Into<String>>(mut self, league_id: i64, name: S, season: i64, round: R) -> Self {
        self.league_id = league_id;
        self.league_name = name.into();
        self.season = season;
        self.round = round.into();
        self
    }

    pub fn between<S: Into<String>, T: Into<String>>(mut self, home_id: i64, home: S, away_id: i64, away: T) -> Self {
        self.home_team_id = home_id;
        self.home_team_name = home.into();
        self.away_team_id = away_id;
        self.away_team_name = away.into();
        self
    }

    pub fn with_goals(mut self, home: i64, away: i64) -> Self {
        self.home_goals = Some(home);
        self.away_goals = Some(away);
        self
    }

    pub fn with_statistics(mut self, statistics: Value) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_lineups(mut self, lineups: Value) -> Self {
        self.lineups = Some(lineups);
        self
    }

    pub fn with_events(mut self, events: Value) -> Self {
        self.events = Some(events);
        self
    }

    pub fn has_statistics(&self) -> bool {
        enrichment_present(&self.statistics)
    }

    pub fn has_lineups(&self) -> bool {
        enrichment_present(&self.lineups)
    }

    pub fn has_events(&self) -> bool {
        enrichment_present(&self.events)
    }

    /// True when all three enrichment payloads are present.
    pub fn enrichment_complete(&self) -> bool {
        self.has_statistics() && self.has_lineups() && self.has_events()
    }
}

/// The single presence predicate for enrichment payloads.
///
/// An absent field, a JSON `null` and an empty array are all equivalent "missing" states. The same three-way rule is
/// applied on the SQL side by [`crate::sqlite`]; keep the two in sync.
pub fn enrichment_present(field: &Option<Value>) -> bool {
    match field {
        None => false,
        Some(Value::Null) => false,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

//--------------------------------------    TrackedMatch     ---------------------------------------------------------

/// A user's record of having watched a fixture.
///
/// The record carries a denormalized copy of the fixture's league/team/goal summary as it stood at creation time.
/// It is exclusively owned by `username`: relocation and deletion are keyed on `(fixture_id, username)` so another
/// user's call simply matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TrackedMatch {
    pub id: i64,
    pub fixture_id: i64,
    pub username: String,
    pub kickoff: i64,
    pub league_id: i64,
    pub league_name: String,
    pub season: i64,
    pub round: String,
    pub home_team_id: i64,
    pub home_team_name: String,
    pub away_team_id: i64,
    pub away_team_name: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    /// Opaque location reference chosen by the user. `None` until assigned.
    pub location: Option<String>,
    /// Status code snapshot taken when the record was created. Kept as plain text; it is never interpreted.
    pub status: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------  NewTrackedMatch    ---------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrackedMatch {
    pub fixture_id: i64,
    pub username: String,
    pub kickoff: i64,
    pub league_id: i64,
    pub league_name: String,
    pub season: i64,
    pub round: String,
    pub home_team_id: i64,
    pub home_team_name: String,
    pub away_team_id: i64,
    pub away_team_name: String,
    pub home_goals: Option<i64>,
    pub away_goals: Option<i64>,
    pub location: Option<String>,
    pub status: String,
}

impl NewTrackedMatch {
    /// Builds a tracking record from a canonical fixture, copying the denormalized summary fields.
    pub fn from_fixture<S: Into<String>>(fixture: &Fixture, username: S) -> Self {
        Self {
            fixture_id: fixture.fixture_id,
            username: username.into(),
            kickoff: fixture.kickoff,
            league_id: fixture.league_id,
            league_name: fixture.league_name.clone(),
            season: fixture.season,
            round: fixture.round.clone(),
            home_team_id: fixture.home_team_id,
            home_team_name: fixture.home_team_name.clone(),
            away_team_id: fixture.away_team_id,
            away_team_name: fixture.away_team_name.clone(),
            home_goals: fixture.home_goals,
            away_goals: fixture.away_goals,
            location: None,
            status: fixture.status.to_string(),
        }
    }

    pub fn at_location<S: Into<String>>(mut self, location: S) -> Self {
        self.location = Some(location.into());
        self
    }
}

//--------------------------------------   FixtureTracker    ---------------------------------------------------------

/// One (fixture, username) tracking association, as returned by the tracker lookup.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FixtureTracker {
    pub fixture_id: i64,
    pub username: String,
}
