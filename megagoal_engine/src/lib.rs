//! MegaGoal Match Engine
//!
//! MegaGoal tracks the football matches a user has watched against a canonical, externally-ingested fixture
//! catalog. This library contains the core reconciliation and derived-view logic. It is transport-agnostic: a thin
//! HTTP layer is expected to sit on top and serialize the results as JSON.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@sqlite`] behind the `sqlite` feature). You should never need to
//!    access the database directly; use the public APIs instead. The exception is the data types, which are
//!    defined in [`db_types`] and are public.
//! 2. The engine public API ([`mod@mge_api`]). Each API is generic over a backend implementing the store traits
//!    in [`traits`], so alternative backends only need to implement those traits.
//! 3. The derived views ([`rounds`], [`live`], [`paging`], [`stats`]). These are pure: they operate on fixtures
//!    and tracking records already fetched through the APIs, and are driven by an explicit [`config::ViewConfig`]
//!    rather than any process-wide settings.
//!
//! The catalog is read-only from the engine's perspective: ingestion and enrichment jobs populate it out-of-band,
//! and every derived view recomputes from current data instead of trusting stored flags.

pub mod config;
pub mod db_types;
pub mod helpers;
pub mod live;
pub mod mge_api;
pub mod paging;
pub mod rounds;
pub mod stats;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;

pub use mge_api::{
    completeness_api::{CompletenessApi, INCOMPLETE_PAGE_SIZE},
    completeness_objects::{Completeness, IncompleteFixture},
    errors::CompletenessApiError,
    fixture_api::FixtureApi,
    fixture_objects::FixtureQueryFilter,
    tracking_api::TrackingApi,
    tracking_objects::TrackedQueryFilter,
};
pub use traits::{FixtureApiError, FixtureManagement, TrackingApiError, TrackingManagement};
