//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use queuedesk_app::domain::tenants::records::TenantId;

const TENANT_ID_DEPOT_KEY: &str = "tenant_id";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the tenant an operator token resolved to.
    fn insert_tenant_id(&mut self, tenant: TenantId);

    fn tenant_id_or_401(&self) -> Result<TenantId, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_tenant_id(&mut self, tenant: TenantId) {
        self.insert(TENANT_ID_DEPOT_KEY, tenant);
    }

    fn tenant_id_or_401(&self) -> Result<TenantId, StatusError> {
        self.get::<TenantId>(TENANT_ID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
