//! # Store interface traits
//!
//! The engine never talks to a concrete store directly; it consumes the read (and, for tracking records, write)
//! behaviour defined here. A backend becomes usable by implementing these traits - [`crate::SqliteDatabase`] is the
//! bundled implementation.
//!
//! * [`FixtureManagement`] covers the canonical fixture catalog. The engine treats the catalog as read-only;
//!   ingestion and enrichment happen out-of-band.
//! * [`TrackingManagement`] covers the per-user tracking records, including the owner-keyed mutations.
//!
//! Every method is an independent, failable store round-trip. The engine performs no retries and assumes no
//! atomicity across two calls; callers decide retry policy when a [`FixtureApiError::StoreUnavailable`] or
//! [`TrackingApiError::StoreUnavailable`] surfaces.

mod fixture_management;
mod tracking_management;

pub use fixture_management::{FixtureApiError, FixtureManagement};
pub use tracking_management::{TrackingApiError, TrackingManagement};
