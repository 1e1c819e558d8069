//! Tenant Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::tenants::records::TenantRecord;

/// Tenant as listed to unauthenticated devices and displays.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicTenantResponse {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub active_counters: u32,
}

impl From<TenantRecord> for PublicTenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        PublicTenantResponse {
            id: tenant.id.into_i64(),
            name: tenant.name,
            active: tenant.active,
            active_counters: tenant.active_counters,
        }
    }
}
