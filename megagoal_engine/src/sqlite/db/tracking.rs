use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{FixtureTracker, NewTrackedMatch, TrackedMatch},
    mge_api::tracking_objects::TrackedQueryFilter,
};

/// Inserts the tracking record, returning `false` in the second parameter if the user already tracks the fixture.
pub async fn idempotent_insert(
    record: NewTrackedMatch,
    conn: &mut SqliteConnection,
) -> Result<(TrackedMatch, bool), sqlx::Error> {
    let inserted = match fetch_tracked_match(record.fixture_id, &record.username, &mut *conn).await? {
        Some(existing) => (existing, false),
        None => {
            let record = insert_tracked_match(record, conn).await?;
            debug!("🗃️ Tracking record inserted for fixture {} with id {}", record.fixture_id, record.id);
            (record, true)
        },
    };
    Ok(inserted)
}

async fn insert_tracked_match(
    record: NewTrackedMatch,
    conn: &mut SqliteConnection,
) -> Result<TrackedMatch, sqlx::Error> {
    let record = sqlx::query_as(
        r#"
            INSERT INTO tracked_matches (
                fixture_id, username, kickoff, league_id, league_name, season, round,
                home_team_id, home_team_name, away_team_id, away_team_name,
                home_goals, away_goals, location, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *;
        "#,
    )
    .bind(record.fixture_id)
    .bind(record.username)
    .bind(record.kickoff)
    .bind(record.league_id)
    .bind(record.league_name)
    .bind(record.season)
    .bind(record.round)
    .bind(record.home_team_id)
    .bind(record.home_team_name)
    .bind(record.away_team_id)
    .bind(record.away_team_name)
    .bind(record.home_goals)
    .bind(record.away_goals)
    .bind(record.location)
    .bind(record.status)
    .fetch_one(conn)
    .await?;
    Ok(record)
}

pub async fn fetch_tracked_match(
    fixture_id: i64,
    username: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<TrackedMatch>, sqlx::Error> {
    let record = sqlx::query_as("SELECT * FROM tracked_matches WHERE fixture_id = $1 AND username = $2")
        .bind(fixture_id)
        .bind(username)
        .fetch_optional(conn)
        .await?;
    Ok(record)
}

/// The distinct fixture ids referenced by any tracking record, ascending.
pub async fn distinct_tracked_fixture_ids(conn: &mut SqliteConnection) -> Result<Vec<i64>, sqlx::Error> {
    let ids = sqlx::query_scalar("SELECT DISTINCT fixture_id FROM tracked_matches ORDER BY fixture_id")
        .fetch_all(conn)
        .await?;
    Ok(ids)
}

/// All (fixture, username) pairs for the given fixtures, ordered by fixture id then username.
pub async fn trackers_for_fixtures(
    ids: &[i64],
    conn: &mut SqliteConnection,
) -> Result<Vec<FixtureTracker>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT fixture_id, username FROM tracked_matches WHERE fixture_id IN (");
    let mut id_list = builder.separated(", ");
    for id in ids {
        id_list.push_bind(*id);
    }
    builder.push(") ORDER BY fixture_id, username");
    let trackers: Vec<FixtureTracker> = builder.build_query_as().fetch_all(conn).await?;
    Ok(trackers)
}

/// Reassigns the location of the caller's record. The update is keyed on `(fixture_id, username)`: a caller who
/// does not own the record matches no row and gets `None` back.
pub async fn relocate(
    fixture_id: i64,
    username: &str,
    location: Option<&str>,
    conn: &mut SqliteConnection,
) -> Result<Option<TrackedMatch>, sqlx::Error> {
    let record =
        sqlx::query_as("UPDATE tracked_matches SET location = $1 WHERE fixture_id = $2 AND username = $3 RETURNING *")
            .bind(location)
            .bind(fixture_id)
            .bind(username)
            .fetch_optional(conn)
            .await?;
    Ok(record)
}

/// Deletes the caller's record, keyed on `(fixture_id, username)` like [`relocate`].
pub async fn delete(fixture_id: i64, username: &str, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tracked_matches WHERE fixture_id = $1 AND username = $2")
        .bind(fixture_id)
        .bind(username)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Fetches tracking records according to the criteria in the `TrackedQueryFilter`.
///
/// Resulting records are ordered by kickoff in descending order.
pub async fn search_tracked_matches(
    query: TrackedQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<TrackedMatch>, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT * FROM tracked_matches ");
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(username) = query.username {
        where_clause.push("username = ");
        where_clause.push_bind_unseparated(username);
    }
    if let Some(team_id) = query.team_id {
        where_clause.push("(home_team_id = ");
        where_clause.push_bind_unseparated(team_id);
        where_clause.push_unseparated(" OR away_team_id = ");
        where_clause.push_bind_unseparated(team_id);
        where_clause.push_unseparated(")");
    }
    if let Some(season) = query.season {
        where_clause.push("season = ");
        where_clause.push_bind_unseparated(season);
    }
    builder.push(" ORDER BY kickoff DESC");

    trace!("🗃️ Executing query: {}", builder.sql());
    let records: Vec<TrackedMatch> = builder.build_query_as().fetch_all(conn).await?;
    Ok(records)
}
