//! Devices service.

use async_trait::async_trait;
use mockall::automock;
use smallvec::SmallVec;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        devices::{
            data::ActivationRequest,
            errors::DevicesServiceError,
            records::DeviceRecord,
            repository::PgDevicesRepository,
            transition::{IndexRule, RowWrite, plan},
        },
        tenants::{records::TenantId, repository::PgTenantsRepository},
    },
    retry::retry_on_conflict,
};

#[derive(Debug, Clone)]
pub struct PgDevicesService {
    db: Db,
    tenants: PgTenantsRepository,
    repository: PgDevicesRepository,
}

impl PgDevicesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            tenants: PgTenantsRepository::new(),
            repository: PgDevicesRepository::new(),
        }
    }

    async fn set_activation_once(
        &self,
        device_id: &str,
        tenant: TenantId,
        active: bool,
    ) -> Result<DeviceRecord, DevicesServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_device(&mut tx, device_id).await?;

        // Tenant rows are always locked in ascending id order.
        let mut involved: SmallVec<[TenantId; 2]> = SmallVec::new();
        involved.push(tenant);

        if let Some(previous) = current.as_ref().map(|device| device.tenant_id)
            && previous != tenant
        {
            involved.push(previous);
        }

        involved.sort_unstable();

        for id in involved {
            let locked = self.tenants.lock_tenant(&mut tx, id).await?;

            if locked.is_none() && id == tenant {
                return Err(DevicesServiceError::InvalidTenant);
            }
        }

        let transition = plan(current.as_ref(), tenant, active);

        let counter_index = match transition.index {
            IndexRule::Keep(index) => index,
            IndexRule::AssignNext => self.repository.next_counter_index(&mut tx, tenant).await?,
            IndexRule::Unassigned => 0,
        };

        let record = match (transition.write, current) {
            (RowWrite::Nothing, Some(unchanged)) => unchanged,
            (RowWrite::Insert, _) | (RowWrite::Nothing, None) => self
                .repository
                .insert_device(&mut tx, device_id, tenant, counter_index, active)
                .await?
                .ok_or(DevicesServiceError::Conflict)?,
            (RowWrite::Update, _) => {
                self.repository
                    .update_device(&mut tx, device_id, tenant, counter_index, active)
                    .await?
            }
        };

        if let Some(previous) = transition.decrement {
            self.tenants
                .adjust_active_counters(&mut tx, previous, -1)
                .await?;
        }

        if let Some(next) = transition.increment {
            self.tenants.adjust_active_counters(&mut tx, next, 1).await?;
        }

        tx.commit().await?;

        if transition.write != RowWrite::Nothing {
            info!(
                device_id,
                tenant = %record.tenant_id,
                counter_index = record.counter_index,
                active = record.active,
                "device activation changed"
            );
        }

        Ok(record)
    }
}

#[async_trait]
impl DevicesService for PgDevicesService {
    async fn set_activation(
        &self,
        request: ActivationRequest,
    ) -> Result<DeviceRecord, DevicesServiceError> {
        let device_id = request.device_id.trim();

        if device_id.is_empty() {
            return Err(DevicesServiceError::InvalidArgument("device id must not be empty"));
        }

        let tenant = request.tenant;
        let active = request.active;

        retry_on_conflict(self.db.retry_policy(), "set_activation", move || {
            self.set_activation_once(device_id, tenant, active)
        })
        .await
    }

    async fn get_device(&self, device_id: &str) -> Result<DeviceRecord, DevicesServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let device = self
            .repository
            .get_device(&mut tx, device_id.trim())
            .await?
            .ok_or(DevicesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(device)
    }

    async fn list_devices(
        &self,
        tenant: TenantId,
    ) -> Result<Vec<DeviceRecord>, DevicesServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        self.tenants
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(DevicesServiceError::InvalidTenant)?;

        let devices = self.repository.list_devices(&mut tx, tenant).await?;

        tx.commit().await?;

        Ok(devices)
    }
}

#[automock]
#[async_trait]
/// Device-to-tenant bindings and counter activation.
pub trait DevicesService: Send + Sync {
    /// Bind a device to a tenant and switch its counter on or off.
    async fn set_activation(
        &self,
        request: ActivationRequest,
    ) -> Result<DeviceRecord, DevicesServiceError>;

    /// Look up which tenant a device belongs to.
    async fn get_device(&self, device_id: &str) -> Result<DeviceRecord, DevicesServiceError>;

    /// A tenant's devices ordered by counter index.
    async fn list_devices(&self, tenant: TenantId)
    -> Result<Vec<DeviceRecord>, DevicesServiceError>;
}
