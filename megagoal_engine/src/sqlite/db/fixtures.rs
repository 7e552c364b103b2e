use chrono::{TimeZone, Utc};
use log::{error, trace};
use serde_json::Value;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{Fixture, FixtureStatus},
    mge_api::fixture_objects::FixtureQueryFilter,
};

/// Raw row shape of the `fixtures` table. Converted into [`Fixture`] so the rest of the engine never sees the
/// stored text representations.
#[derive(FromRow)]
struct FixtureRow {
    fixture_id: i64,
    kickoff: i64,
    status: String,
    league_id: i64,
    league_name: String,
    season: i64,
    round: String,
    home_team_id: i64,
    home_team_name: String,
    away_team_id: i64,
    away_team_name: String,
    home_goals: Option<i64>,
    away_goals: Option<i64>,
    statistics: Option<String>,
    lineups: Option<String>,
    events: Option<String>,
}

impl From<FixtureRow> for Fixture {
    fn from(row: FixtureRow) -> Self {
        Fixture {
            fixture_id: row.fixture_id,
            kickoff: row.kickoff,
            status: FixtureStatus::from(row.status),
            league_id: row.league_id,
            league_name: row.league_name,
            season: row.season,
            round: row.round,
            home_team_id: row.home_team_id,
            home_team_name: row.home_team_name,
            away_team_id: row.away_team_id,
            away_team_name: row.away_team_name,
            home_goals: row.home_goals,
            away_goals: row.away_goals,
            statistics: parse_enrichment(row.statistics),
            lineups: parse_enrichment(row.lineups),
            events: parse_enrichment(row.events),
        }
    }
}

fn parse_enrichment(raw: Option<String>) -> Option<Value> {
    let raw = raw?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            error!("Discarding unparseable enrichment payload: {e}");
            None
        },
    }
}

fn enrichment_text(field: &Option<Value>) -> Option<String> {
    field.as_ref().map(|v| v.to_string())
}

/// The single SQL form of the "missing enrichment" rule: absent, JSON null and the empty array are equivalent.
/// Matches [`crate::db_types::enrichment_present`] on the Rust side.
fn missing_enrichment(column: &str) -> String {
    format!("({column} IS NULL OR {column} = 'null' OR {column} = '[]')")
}

fn push_unenriched_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, ids: &'a [i64]) {
    builder.push("fixture_id IN (");
    let mut id_list = builder.separated(", ");
    for id in ids {
        id_list.push_bind(*id);
    }
    builder.push(")");
    for column in ["statistics", "lineups", "events"] {
        builder.push(" AND ");
        builder.push(missing_enrichment(column));
    }
}

pub async fn fetch_fixture(fixture_id: i64, conn: &mut SqliteConnection) -> Result<Option<Fixture>, sqlx::Error> {
    let row: Option<FixtureRow> = sqlx::query_as("SELECT * FROM fixtures WHERE fixture_id = $1")
        .bind(fixture_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(Fixture::from))
}

/// Fetches fixtures according to the criteria in the `FixtureQueryFilter`.
///
/// Resulting fixtures are ordered by kickoff in descending order.
pub async fn search_fixtures(
    query: FixtureQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Fixture>, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT * FROM fixtures ");
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(league_id) = query.league_id {
        where_clause.push("league_id = ");
        where_clause.push_bind_unseparated(league_id);
    }
    if let Some(season) = query.season {
        where_clause.push("season = ");
        where_clause.push_bind_unseparated(season);
    }
    if let Some(team_id) = query.team_id {
        where_clause.push("(home_team_id = ");
        where_clause.push_bind_unseparated(team_id);
        where_clause.push_unseparated(" OR away_team_id = ");
        where_clause.push_bind_unseparated(team_id);
        where_clause.push_unseparated(")");
    }
    if let Some(day) = query.day {
        let start = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap()).timestamp();
        where_clause.push("kickoff >= ");
        where_clause.push_bind_unseparated(start);
        where_clause.push("kickoff < ");
        where_clause.push_bind_unseparated(start + 86_400);
    }
    builder.push(" ORDER BY kickoff DESC");

    trace!("🗃️ Executing query: {}", builder.sql());
    let rows: Vec<FixtureRow> = builder.build_query_as().fetch_all(conn).await?;
    Ok(rows.into_iter().map(Fixture::from).collect())
}

/// Fetches one page of the fixtures among `ids` with no enrichment at all, ordered by kickoff descending.
pub async fn fetch_unenriched(
    ids: &[i64],
    limit: i64,
    offset: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Fixture>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT * FROM fixtures WHERE ");
    push_unenriched_filter(&mut builder, ids);
    builder.push(" ORDER BY kickoff DESC LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    trace!("🗃️ Executing query: {}", builder.sql());
    let rows: Vec<FixtureRow> = builder.build_query_as().fetch_all(conn).await?;
    Ok(rows.into_iter().map(Fixture::from).collect())
}

/// Counts the fixtures among `ids` with no enrichment at all, using exactly the filter of [`fetch_unenriched`].
pub async fn count_unenriched(ids: &[i64], conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM fixtures WHERE ");
    push_unenriched_filter(&mut builder, ids);
    let count: i64 = builder.build_query_scalar().fetch_one(conn).await?;
    Ok(count)
}

/// Inserts or replaces a catalog entry. This is the ingestion seam; the engine itself never calls it outside of
/// seeding.
pub async fn upsert_fixture(fixture: &Fixture, conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
            INSERT INTO fixtures (
                fixture_id, kickoff, status, league_id, league_name, season, round,
                home_team_id, home_team_name, away_team_id, away_team_name,
                home_goals, away_goals, statistics, lineups, events
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (fixture_id) DO UPDATE SET
                kickoff = excluded.kickoff,
                status = excluded.status,
                league_id = excluded.league_id,
                league_name = excluded.league_name,
                season = excluded.season,
                round = excluded.round,
                home_team_id = excluded.home_team_id,
                home_team_name = excluded.home_team_name,
                away_team_id = excluded.away_team_id,
                away_team_name = excluded.away_team_name,
                home_goals = excluded.home_goals,
                away_goals = excluded.away_goals,
                statistics = excluded.statistics,
                lineups = excluded.lineups,
                events = excluded.events,
                updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(fixture.fixture_id)
    .bind(fixture.kickoff)
    .bind(fixture.status.to_string())
    .bind(fixture.league_id)
    .bind(&fixture.league_name)
    .bind(fixture.season)
    .bind(&fixture.round)
    .bind(fixture.home_team_id)
    .bind(&fixture.home_team_name)
    .bind(fixture.away_team_id)
    .bind(&fixture.away_team_name)
    .bind(fixture.home_goals)
    .bind(fixture.away_goals)
    .bind(enrichment_text(&fixture.statistics))
    .bind(enrichment_text(&fixture.lineups))
    .bind(enrichment_text(&fixture.events))
    .execute(conn)
    .await?;
    Ok(())
}
