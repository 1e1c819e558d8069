//! Tenant Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use queuedesk_app::domain::tenants::TenantsServiceError;

pub(crate) fn into_status_error(error: TenantsServiceError) -> StatusError {
    match error {
        TenantsServiceError::NotFound => StatusError::not_found().brief("Unknown tenant"),
        TenantsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid tenant payload")
        }
        TenantsServiceError::StoreUnavailable(source) => {
            warn!("tenant store unavailable: {source}");

            StatusError::service_unavailable()
        }
        TenantsServiceError::Sql(source) => {
            error!("tenant query failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
