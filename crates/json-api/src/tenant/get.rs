//! Get Own Tenant Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::tenants::records::TenantRecord;

use crate::{extensions::*, state::State, tenant::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TenantResponse {
    pub id: i64,
    pub name: String,

    /// Whether kiosks may issue new tickets
    pub active: bool,

    /// Devices currently open as counters
    pub active_counters: u32,

    pub created_at: String,
    pub updated_at: String,
}

impl From<TenantRecord> for TenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        TenantResponse {
            id: tenant.id.into_i64(),
            name: tenant.name,
            active: tenant.active,
            active_counters: tenant.active_counters,
            created_at: tenant.created_at.to_string(),
            updated_at: tenant.updated_at.to_string(),
        }
    }
}

/// Get Own Tenant Handler
///
/// Returns the tenant the bearer token belongs to.
#[endpoint(
    tags("tenant"),
    summary = "Get Own Tenant",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;

    let tenant = state
        .app
        .tenants
        .get_tenant(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}
