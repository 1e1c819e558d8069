//! Tenants service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::StoreFailure;

/// Tenant service error variants.
#[derive(Debug, Error)]
pub enum TenantsServiceError {
    /// Tenant was not found.
    #[error("tenant not found")]
    NotFound,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// The store could not be reached.
    #[error("store unavailable")]
    StoreUnavailable(#[source] Error),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TenantsServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::RowNotFound => Self::NotFound,
            StoreFailure::NotNullViolation | StoreFailure::CheckViolation => Self::InvalidData,
            StoreFailure::Unavailable => Self::StoreUnavailable(error),
            StoreFailure::UniqueViolation
            | StoreFailure::ForeignKeyViolation
            | StoreFailure::Contention
            | StoreFailure::Other => Self::Sql(error),
        }
    }
}
