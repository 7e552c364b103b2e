//! SQLite backend for the match engine.
//!
//! Implements the store traits in the [`crate::traits`] module on top of sqlx.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
