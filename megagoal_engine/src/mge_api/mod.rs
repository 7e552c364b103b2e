//! # MegaGoal engine public API
//!
//! The `mge_api` module exposes the programmatic API of the match engine. The API is modular: clients pick the
//! pieces they need, and each piece is generic over a backend implementing the store traits it requires.
//!
//! * [`completeness_api`] joins the fixture catalog against the tracking records to report fixtures whose
//!   enrichment has not arrived yet, paginated.
//! * [`fixture_api`] queries the canonical catalog (league-season, team-season and single-day views).
//! * [`tracking_api`] manages a user's tracking records (insert, relocate, delete, search).
//!
//! The pattern for using the APIs is the same everywhere: construct an API instance with a database backend that
//! implements the required traits.
//!
//! ```rust,ignore
//! use megagoal_engine::{CompletenessApi, SqliteDatabase};
//! let db = SqliteDatabase::new(5).await?;
//! // SqliteDatabase implements FixtureManagement and TrackingManagement
//! let api = CompletenessApi::new(db);
//! let page = api.resolve_incomplete(1).await?;
//! ```

pub mod completeness_api;
pub mod completeness_objects;
pub mod errors;
pub mod fixture_api;
pub mod fixture_objects;
pub mod tracking_api;
pub mod tracking_objects;
