//! Analytics Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use queuedesk_app::domain::analytics::AnalyticsServiceError;

pub(crate) fn into_status_error(error: AnalyticsServiceError) -> StatusError {
    match error {
        AnalyticsServiceError::TenantNotFound => StatusError::not_found().brief("Unknown tenant"),
        AnalyticsServiceError::StoreUnavailable(_) => {
            warn!("analytics store unavailable: {error}");

            StatusError::service_unavailable()
        }
        AnalyticsServiceError::Sql(source) => {
            error!("failed to derive queue metrics: {source}");

            StatusError::internal_server_error()
        }
    }
}
