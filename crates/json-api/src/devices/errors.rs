//! Device Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use queuedesk_app::domain::devices::DevicesServiceError;

pub(crate) fn into_status_error(error: DevicesServiceError) -> StatusError {
    match error {
        DevicesServiceError::InvalidArgument(brief) => StatusError::bad_request().brief(brief),
        DevicesServiceError::InvalidTenant => StatusError::not_found().brief("Unknown tenant"),
        DevicesServiceError::NotFound => StatusError::not_found().brief("Unknown device"),
        DevicesServiceError::Conflict | DevicesServiceError::StoreUnavailable(_) => {
            warn!("device store unavailable: {error}");

            StatusError::service_unavailable()
        }
        DevicesServiceError::Sql(source) => {
            error!("device query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
