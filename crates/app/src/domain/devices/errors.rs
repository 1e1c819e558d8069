//! Devices service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{database::StoreFailure, retry::Contended};

#[derive(Debug, Error)]
pub enum DevicesServiceError {
    /// The device id was blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The requested tenant does not exist.
    #[error("tenant not found")]
    InvalidTenant,

    #[error("device not found")]
    NotFound,

    /// Lost a race with a concurrent activation; retried internally.
    #[error("concurrent activation conflict")]
    Conflict,

    #[error("store unavailable")]
    StoreUnavailable(Option<Error>),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for DevicesServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::UniqueViolation | StoreFailure::Contention => Self::Conflict,
            StoreFailure::ForeignKeyViolation => Self::InvalidTenant,
            StoreFailure::RowNotFound => Self::NotFound,
            StoreFailure::Unavailable => Self::StoreUnavailable(Some(error)),
            StoreFailure::NotNullViolation | StoreFailure::CheckViolation | StoreFailure::Other => {
                Self::Sql(error)
            }
        }
    }
}

impl Contended for DevicesServiceError {
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
