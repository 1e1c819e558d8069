//! Serving Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use queuedesk_app::domain::serving::ServingServiceError;

pub(crate) fn into_status_error(error: ServingServiceError) -> StatusError {
    match error {
        ServingServiceError::TenantNotFound => StatusError::not_found().brief("Unknown tenant"),
        ServingServiceError::NotFound => StatusError::not_found().brief("Unknown ticket"),
        ServingServiceError::AlreadyServed => {
            StatusError::conflict().brief("Ticket has already been served")
        }
        ServingServiceError::NotServed => {
            StatusError::conflict().brief("Ticket must be served first")
        }
        ServingServiceError::AlreadyAdvanced => {
            StatusError::conflict().brief("Queue has already moved past this ticket")
        }
        ServingServiceError::StoreUnavailable(_) => {
            warn!("serving store unavailable: {error}");

            StatusError::service_unavailable()
        }
        ServingServiceError::Sql(source) => {
            error!("serving query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
