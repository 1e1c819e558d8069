//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::tenants::{
        data::{NewTenant, TenantUpdate},
        errors::TenantsServiceError,
        records::{TenantId, TenantRecord},
        repository::PgTenantsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    db: Db,
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTenantsRepository::new(),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        if tenant.name.trim().is_empty() {
            return Err(TenantsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_tenant(&mut tx, tenant).await?;

        tx.commit().await?;

        info!(tenant = %created.id, name = %created.name, "tenant created");

        Ok(created)
    }

    async fn get_tenant(&self, tenant: TenantId) -> Result<TenantRecord, TenantsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let record = self
            .repository
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(TenantsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let tenants = self.repository.list_tenants(&mut tx).await?;

        tx.commit().await?;

        Ok(tenants)
    }

    async fn update_tenant(
        &self,
        tenant: TenantId,
        update: TenantUpdate,
    ) -> Result<TenantRecord, TenantsServiceError> {
        if update
            .name
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(TenantsServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_tenant(&mut tx, tenant, update).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
/// Administrative tenant operations.
pub trait TenantsService: Send + Sync {
    /// Creates a new tenant with zero active counters.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Fetch a single tenant.
    async fn get_tenant(&self, tenant: TenantId) -> Result<TenantRecord, TenantsServiceError>;

    /// All tenants ordered by id.
    async fn list_tenants(&self) -> Result<Vec<TenantRecord>, TenantsServiceError>;

    /// Rename and/or (de)activate a tenant.
    async fn update_tenant(
        &self,
        tenant: TenantId,
        update: TenantUpdate,
    ) -> Result<TenantRecord, TenantsServiceError>;
}
