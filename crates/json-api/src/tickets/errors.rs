//! Ticket Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use queuedesk_app::domain::tickets::TicketsServiceError;

pub(crate) fn into_status_error(error: TicketsServiceError) -> StatusError {
    match error {
        TicketsServiceError::InvalidIdentity => {
            StatusError::bad_request().brief("national_id and reference must not be empty")
        }
        TicketsServiceError::PastIssueDate => {
            StatusError::bad_request().brief("Tickets cannot be issued for a past day")
        }
        TicketsServiceError::TenantNotFound => StatusError::not_found().brief("Unknown tenant"),
        TicketsServiceError::TenantInactive => {
            StatusError::conflict().brief("Tenant is not accepting tickets")
        }
        TicketsServiceError::NotFound => StatusError::not_found().brief("Unknown ticket"),
        TicketsServiceError::Conflict | TicketsServiceError::StoreUnavailable(_) => {
            warn!("ticket store unavailable: {error}");

            StatusError::service_unavailable()
        }
        TicketsServiceError::Sql(source) => {
            error!("ticket query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
