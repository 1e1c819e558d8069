//! Serving service errors.

use sqlx::Error;
use thiserror::Error;

use crate::database::StoreFailure;

#[derive(Debug, Error)]
pub enum ServingServiceError {
    #[error("tenant not found")]
    TenantNotFound,

    /// No ticket with that id belongs to the tenant.
    #[error("ticket not found")]
    NotFound,

    #[error("ticket has already been served")]
    AlreadyServed,

    /// Advancing requires the ticket to be served first.
    #[error("ticket has not been served yet")]
    NotServed,

    #[error("ticket has already been advanced")]
    AlreadyAdvanced,

    #[error("store unavailable")]
    StoreUnavailable(Option<Error>),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ServingServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::RowNotFound => Self::NotFound,
            StoreFailure::Unavailable | StoreFailure::Contention => {
                Self::StoreUnavailable(Some(error))
            }
            StoreFailure::UniqueViolation
            | StoreFailure::ForeignKeyViolation
            | StoreFailure::NotNullViolation
            | StoreFailure::CheckViolation
            | StoreFailure::Other => Self::Sql(error),
        }
    }
}
