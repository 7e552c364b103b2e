use std::path::Path;

use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Creates a fresh database at `url` and brings the schema up to date. Dropping any previous database first makes
/// the call safe to repeat with a fixed url.
pub async fn prepare_test_env(url: &str) {
    #[cfg(feature = "test_utils")]
    init_test_logging();
    create_database(url).await;
    run_migrations(url).await;
}

/// Initialises env_logger once, reading `.env.test` first so `RUST_LOG` can be set per checkout.
#[cfg(feature = "test_utils")]
pub fn init_test_logging() {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
}

/// A unique database url under the system temp directory.
pub fn random_db_path() -> String {
    format!("sqlite://{}/megagoal_test_{}.db", std::env::temp_dir().display(), rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    migrate!("./src/sqlite/migrations").run(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
}

pub async fn create_database<P: AsRef<Path>>(path: P) {
    let p = path.as_ref().as_os_str().to_str().unwrap();
    if let Err(e) = Sqlite::drop_database(p).await {
        warn!("Error dropping database {p}: {e:?}");
    }
    Sqlite::create_database(p).await.expect("Error creating database");
    info!("Created Sqlite database {p}");
}
