//! End-to-end tests of the completeness resolver against the SQLite backend.

use megagoal_engine::{
    db_types::{Fixture, FixtureStatus, NewTrackedMatch},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    CompletenessApi, SqliteDatabase, TrackingApi,
};
use serde_json::json;

async fn new_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

fn fixture(id: i64, kickoff: i64) -> Fixture {
    Fixture::new(id, kickoff, FixtureStatus::FullTime)
        .in_league(39, "Premier League", 2024, "Regular Season - 1")
        .between(40, "Liverpool", 50, "Manchester City")
        .with_goals(1, 0)
}

fn tracked_by(item: &megagoal_engine::IncompleteFixture) -> Vec<&str> {
    item.tracked_by.iter().map(String::as_str).collect()
}

#[tokio::test]
async fn empty_tracking_store_short_circuits() {
    let db = new_db().await;
    // The catalog has an unenriched fixture, but nobody tracks anything
    db.upsert_fixtures(&[fixture(1, 1_700_000_000)]).await.unwrap();
    let api = CompletenessApi::new(db);
    let page = api.resolve_incomplete(1).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn reports_only_fully_unenriched_tracked_fixtures() {
    let db = new_db().await;
    let enriched = fixture(1, 1_700_000_000)
        .with_statistics(json!([{ "team": 40 }]))
        .with_lineups(json!([{ "team": 40 }]))
        .with_events(json!([{ "type": "Goal" }]));
    let partially = fixture(2, 1_700_003_600).with_statistics(json!([{ "team": 40 }]));
    let unenriched = fixture(3, 1_700_007_200);
    let untracked = fixture(4, 1_700_010_800);
    db.upsert_fixtures(&[enriched.clone(), partially.clone(), unenriched.clone(), untracked]).await.unwrap();

    let tracking = TrackingApi::new(db.clone());
    for f in [&enriched, &partially, &unenriched] {
        tracking.track(NewTrackedMatch::from_fixture(f, "alice")).await.unwrap();
    }

    let api = CompletenessApi::new(db);
    let page = api.resolve_incomplete(1).await.unwrap();
    // Fixture 2 still has lineups and events outstanding, but its statistics have arrived, so only fixture 3
    // qualifies. Fixture 4 has no tracking record and is excluded by construction.
    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].fixture.fixture_id, 3);
    assert_eq!(tracked_by(&page.items[0]), vec!["alice"]);
    let completeness = page.items[0].completeness();
    assert!(!completeness.statistics && !completeness.lineups && !completeness.events);
}

#[tokio::test]
async fn tracker_multiplicity_does_not_change_the_total() {
    let db = new_db().await;
    db.upsert_fixtures(&[fixture(1, 1_700_000_000)]).await.unwrap();
    let tracking = TrackingApi::new(db.clone());
    for user in ["erin", "alice", "dave", "bob", "carol"] {
        tracking.track(NewTrackedMatch::from_fixture(&fixture(1, 1_700_000_000), user)).await.unwrap();
    }

    let api = CompletenessApi::new(db);
    let page = api.resolve_incomplete(1).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 1);
    // Annotations are display-only and sorted for determinism
    assert_eq!(tracked_by(&page.items[0]), vec!["alice", "bob", "carol", "dave", "erin"]);
}

#[tokio::test]
async fn pages_are_sliced_newest_first() {
    let db = new_db().await;
    let fixtures: Vec<Fixture> = (1..=60).map(|i| fixture(i, 1_700_000_000 + i * 3_600)).collect();
    db.upsert_fixtures(&fixtures).await.unwrap();
    let tracking = TrackingApi::new(db.clone());
    for f in &fixtures {
        tracking.track(NewTrackedMatch::from_fixture(f, "alice")).await.unwrap();
    }

    let api = CompletenessApi::new(db);
    let first = api.resolve_incomplete(1).await.unwrap();
    assert_eq!(first.total, 60);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items.len(), 50);
    assert_eq!(first.items[0].fixture.fixture_id, 60);

    let second = api.resolve_incomplete(2).await.unwrap();
    assert_eq!(second.items.len(), 10);
    assert_eq!(second.items.last().unwrap().fixture.fixture_id, 1);

    // Page numbers below 1 are clamped, not rejected
    let clamped = api.resolve_incomplete(0).await.unwrap();
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.items.len(), 50);
}

#[tokio::test]
async fn out_of_range_page_returns_totals_without_items() {
    let db = new_db().await;
    let fixtures: Vec<Fixture> = (1..=40).map(|i| fixture(i, 1_700_000_000 + i * 3_600)).collect();
    db.upsert_fixtures(&fixtures).await.unwrap();
    let tracking = TrackingApi::new(db.clone());
    for f in &fixtures {
        tracking.track(NewTrackedMatch::from_fixture(f, "alice")).await.unwrap();
    }

    let api = CompletenessApi::new(db);
    let page = api.resolve_incomplete(3).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 40);
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn null_and_empty_array_payloads_count_as_missing() {
    let db = new_db().await;
    let empty_arrays = fixture(1, 1_700_000_000).with_statistics(json!([])).with_lineups(json!([])).with_events(json!([]));
    db.upsert_fixtures(&[empty_arrays]).await.unwrap();
    // A literal JSON null, as left behind by an enrichment job that found nothing
    sqlx::query("UPDATE fixtures SET statistics = 'null' WHERE fixture_id = 1")
        .execute(db.pool())
        .await
        .unwrap();

    let tracking = TrackingApi::new(db.clone());
    tracking.track(NewTrackedMatch::from_fixture(&fixture(1, 1_700_000_000), "alice")).await.unwrap();

    let api = CompletenessApi::new(db);
    let page = api.resolve_incomplete(1).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].fixture.fixture_id, 1);
}
