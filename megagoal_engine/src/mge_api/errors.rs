use thiserror::Error;

use crate::traits::{FixtureApiError, TrackingApiError};

#[derive(Debug, Clone, Error)]
pub enum CompletenessApiError {
    /// One of the underlying store reads failed. The partial work is discarded; no truncated page is returned.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<FixtureApiError> for CompletenessApiError {
    fn from(e: FixtureApiError) -> Self {
        match e {
            FixtureApiError::StoreUnavailable(msg) => CompletenessApiError::StoreUnavailable(msg),
            FixtureApiError::QueryError(msg) => CompletenessApiError::QueryError(msg),
        }
    }
}

impl From<TrackingApiError> for CompletenessApiError {
    fn from(e: TrackingApiError) -> Self {
        match e {
            TrackingApiError::StoreUnavailable(msg) => CompletenessApiError::StoreUnavailable(msg),
            TrackingApiError::QueryError(msg) => CompletenessApiError::QueryError(msg),
        }
    }
}
