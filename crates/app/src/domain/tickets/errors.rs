//! Tickets service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{database::StoreFailure, retry::Contended};

#[derive(Debug, Error)]
pub enum TicketsServiceError {
    /// National id or reference was blank.
    #[error("requester identity is invalid")]
    InvalidIdentity,

    /// A real issue asked for a day that has already ended.
    #[error("issue date is in the past")]
    PastIssueDate,

    #[error("tenant not found")]
    TenantNotFound,

    /// The tenant is not accepting new tickets.
    #[error("tenant is inactive")]
    TenantInactive,

    #[error("ticket not found")]
    NotFound,

    /// Lost a race with a concurrent writer; retried internally.
    #[error("concurrent allocation conflict")]
    Conflict,

    /// The store was unreachable, or contention outlasted every retry.
    #[error("store unavailable")]
    StoreUnavailable(Option<Error>),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TicketsServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::UniqueViolation | StoreFailure::Contention => Self::Conflict,
            StoreFailure::ForeignKeyViolation => Self::TenantNotFound,
            StoreFailure::RowNotFound => Self::NotFound,
            StoreFailure::Unavailable => Self::StoreUnavailable(Some(error)),
            StoreFailure::NotNullViolation | StoreFailure::CheckViolation | StoreFailure::Other => {
                Self::Sql(error)
            }
        }
    }
}

impl Contended for TicketsServiceError {
    fn is_contended(&self) -> bool {
        matches!(self, Self::Conflict)
    }

    fn into_exhausted(self) -> Self {
        match self {
            Self::Conflict => Self::StoreUnavailable(None),
            other => other,
        }
    }
}
