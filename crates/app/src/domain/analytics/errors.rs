//! Analytics service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::StoreFailure;

#[derive(Debug, Error)]
pub enum AnalyticsServiceError {
    #[error("tenant not found")]
    TenantNotFound,

    #[error("store unavailable")]
    StoreUnavailable(Option<Error>),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AnalyticsServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::Unavailable | StoreFailure::Contention => {
                Self::StoreUnavailable(Some(error))
            }
            _ => Self::Sql(error),
        }
    }
}
