//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{auth::ApiTokenError, database::StoreFailure};

/// Failures while issuing or checking operator tokens.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// Unknown, malformed, revoked, or expired token; or an unknown tenant
    /// when issuing.
    #[error("token not found")]
    NotFound,

    /// The token store could not be reached.
    #[error("token store unavailable")]
    StoreUnavailable(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] ApiTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match StoreFailure::classify(&error) {
            StoreFailure::RowNotFound => Self::NotFound,
            StoreFailure::Unavailable | StoreFailure::Contention => Self::StoreUnavailable(error),
            _ => Self::Sql(error),
        }
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeouts_are_unavailable() {
        let error = AuthServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, AuthServiceError::StoreUnavailable(_)),
            "expected StoreUnavailable, got {error:?}"
        );
    }

    #[test]
    fn missing_rows_are_not_found() {
        assert!(matches!(
            AuthServiceError::from(Error::RowNotFound),
            AuthServiceError::NotFound
        ));
    }
}
