//! Ownership and lifecycle tests for tracking records against the SQLite backend.

use megagoal_engine::{
    db_types::{Fixture, FixtureStatus, NewTrackedMatch},
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase, TrackedQueryFilter, TrackingApi, TrackingApiError, TrackingManagement,
};

async fn new_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database")
}

fn fixture(id: i64, season: i64, home: (i64, &str), away: (i64, &str)) -> Fixture {
    Fixture::new(id, 1_700_000_000 + id * 3_600, FixtureStatus::FullTime)
        .in_league(39, "Premier League", season, "Regular Season - 1")
        .between(home.0, home.1, away.0, away.1)
        .with_goals(2, 1)
}

#[tokio::test]
async fn tracking_is_idempotent_per_user() {
    let db = new_db().await;
    let api = TrackingApi::new(db);
    let f = fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City"));

    let (first, inserted) = api.track(NewTrackedMatch::from_fixture(&f, "alice")).await.unwrap();
    assert!(inserted);
    let (again, inserted) = api.track(NewTrackedMatch::from_fixture(&f, "alice")).await.unwrap();
    assert!(!inserted);
    assert_eq!(first.id, again.id);

    // A second user tracking the same fixture gets an independent record
    let (other, inserted) = api.track(NewTrackedMatch::from_fixture(&f, "bob")).await.unwrap();
    assert!(inserted);
    assert_ne!(first.id, other.id);
}

#[tokio::test]
async fn empty_usernames_are_rejected() {
    let db = new_db().await;
    let api = TrackingApi::new(db);
    let f = fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City"));
    let result = api.track(NewTrackedMatch::from_fixture(&f, "")).await;
    assert!(matches!(result, Err(TrackingApiError::QueryError(_))));
}

#[tokio::test]
async fn only_the_owner_can_relocate() {
    let db = new_db().await;
    let api = TrackingApi::new(db);
    let f = fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City"));
    api.track(NewTrackedMatch::from_fixture(&f, "alice")).await.unwrap();

    let updated = api.relocate(1, "alice", Some("stadium")).await.unwrap();
    assert_eq!(updated.unwrap().location.as_deref(), Some("stadium"));

    // Someone else's relocation attempt matches nothing
    let denied = api.relocate(1, "bob", Some("pub")).await.unwrap();
    assert!(denied.is_none());
    let records = api.matches_for_user("alice").await.unwrap();
    assert_eq!(records[0].location.as_deref(), Some("stadium"));

    // The owner can clear the location again
    let cleared = api.relocate(1, "alice", None).await.unwrap();
    assert!(cleared.unwrap().location.is_none());
}

#[tokio::test]
async fn only_the_owner_can_delete() {
    let db = new_db().await;
    let api = TrackingApi::new(db);
    let f = fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City"));
    api.track(NewTrackedMatch::from_fixture(&f, "alice")).await.unwrap();

    assert!(!api.untrack(1, "bob").await.unwrap());
    assert_eq!(api.matches_for_user("alice").await.unwrap().len(), 1);

    assert!(api.untrack(1, "alice").await.unwrap());
    assert!(api.matches_for_user("alice").await.unwrap().is_empty());
    // Deleting twice is not an error, just a no-op
    assert!(!api.untrack(1, "alice").await.unwrap());
}

#[tokio::test]
async fn search_filters_by_user_team_and_season() {
    let db = new_db().await;
    let api = TrackingApi::new(db.clone());
    let matches = [
        (fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City")), "alice"),
        (fixture(2, 2024, (42, "Arsenal"), (40, "Liverpool")), "alice"),
        (fixture(3, 2023, (40, "Liverpool"), (42, "Arsenal")), "alice"),
        (fixture(4, 2024, (40, "Liverpool"), (50, "Manchester City")), "bob"),
    ];
    for (f, user) in &matches {
        api.track(NewTrackedMatch::from_fixture(f, *user)).await.unwrap();
    }

    // Liverpool in 2024, home or away, alice only
    let query = TrackedQueryFilter::default().for_user("alice").with_team(40).with_season(2024);
    let found = api.search(query).await.unwrap();
    let ids: Vec<i64> = found.iter().map(|m| m.fixture_id).collect();
    assert_eq!(ids, vec![2, 1]);

    let all_alice = api.matches_for_user("alice").await.unwrap();
    assert_eq!(all_alice.len(), 3);
    // Newest kickoff first
    assert_eq!(all_alice[0].fixture_id, 3);

    let ids = db.tracked_fixture_ids().await.unwrap();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn tracker_lookup_is_scoped_and_ordered() {
    let db = new_db().await;
    let api = TrackingApi::new(db.clone());
    let f1 = fixture(1, 2024, (40, "Liverpool"), (50, "Manchester City"));
    let f2 = fixture(2, 2024, (42, "Arsenal"), (40, "Liverpool"));
    api.track(NewTrackedMatch::from_fixture(&f1, "bob")).await.unwrap();
    api.track(NewTrackedMatch::from_fixture(&f1, "alice")).await.unwrap();
    api.track(NewTrackedMatch::from_fixture(&f2, "carol")).await.unwrap();

    let trackers = db.trackers_for_fixtures(&[1]).await.unwrap();
    let pairs: Vec<(i64, &str)> = trackers.iter().map(|t| (t.fixture_id, t.username.as_str())).collect();
    assert_eq!(pairs, vec![(1, "alice"), (1, "bob")]);

    assert!(db.trackers_for_fixtures(&[]).await.unwrap().is_empty());
}
