//! Support for preparing throwaway SQLite databases in tests.
pub mod prepare_env;
