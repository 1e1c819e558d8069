//! Devices Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{devices::records::DeviceRecord, tenants::records::TenantId};

const LOCK_DEVICE_SQL: &str = include_str!("sql/lock_device.sql");
const GET_DEVICE_SQL: &str = include_str!("sql/get_device.sql");
const LIST_DEVICES_SQL: &str = include_str!("sql/list_devices.sql");
const NEXT_COUNTER_INDEX_SQL: &str = include_str!("sql/next_counter_index.sql");
const INSERT_DEVICE_SQL: &str = include_str!("sql/insert_device.sql");
const UPDATE_DEVICE_SQL: &str = include_str!("sql/update_device.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgDevicesRepository;

impl PgDevicesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn lock_device(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        device_id: &str,
    ) -> Result<Option<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(LOCK_DEVICE_SQL)
            .bind(device_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_device(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        device_id: &str,
    ) -> Result<Option<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(GET_DEVICE_SQL)
            .bind(device_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_devices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
    ) -> Result<Vec<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(LIST_DEVICES_SQL)
            .bind(tenant.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn next_counter_index(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
    ) -> Result<u32, sqlx::Error> {
        let next: i32 = query_scalar(NEXT_COUNTER_INDEX_SQL)
            .bind(tenant.into_i64())
            .fetch_one(&mut **tx)
            .await?;

        decode_counter_index(next)
    }

    /// Returns `None` when another transaction registered the device first.
    pub(crate) async fn insert_device(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        device_id: &str,
        tenant: TenantId,
        counter_index: u32,
        active: bool,
    ) -> Result<Option<DeviceRecord>, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(INSERT_DEVICE_SQL)
            .bind(device_id)
            .bind(tenant.into_i64())
            .bind(encode_counter_index(counter_index)?)
            .bind(active)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_device(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        device_id: &str,
        tenant: TenantId,
        counter_index: u32,
        active: bool,
    ) -> Result<DeviceRecord, sqlx::Error> {
        query_as::<Postgres, DeviceRecord>(UPDATE_DEVICE_SQL)
            .bind(device_id)
            .bind(tenant.into_i64())
            .bind(encode_counter_index(counter_index)?)
            .bind(active)
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_counter_index(counter_index: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(counter_index).map_err(|e| sqlx::Error::ColumnDecode {
        index: "counter_index".to_string(),
        source: Box::new(e),
    })
}

fn encode_counter_index(counter_index: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(counter_index).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

impl<'r> FromRow<'r, PgRow> for DeviceRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            device_id: row.try_get("device_id")?,
            tenant_id: TenantId::from_i64(row.try_get("tenant_id")?),
            counter_index: decode_counter_index(row.try_get("counter_index")?)?,
            active: row.try_get("active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
