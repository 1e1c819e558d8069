//! Tenants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::tenants::{
    data::{NewTenant, TenantUpdate},
    records::{TenantId, TenantRecord},
};

const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const GET_TENANT_SQL: &str = include_str!("sql/get_tenant.sql");
const LOCK_TENANT_SQL: &str = include_str!("sql/lock_tenant.sql");
const LIST_TENANTS_SQL: &str = include_str!("sql/list_tenants.sql");
const UPDATE_TENANT_SQL: &str = include_str!("sql/update_tenant.sql");
const ADJUST_ACTIVE_COUNTERS_SQL: &str = include_str!("sql/adjust_active_counters.sql");

#[derive(Debug, Clone, Default)]
/// PostgreSQL-backed tenants repository.
pub(crate) struct PgTenantsRepository;

impl PgTenantsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: NewTenant,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.name)
            .bind(tenant.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
    ) -> Result<Option<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(GET_TENANT_SQL)
            .bind(tenant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Read the tenant row and hold its lock until the transaction ends.
    ///
    /// `FOR NO KEY UPDATE` serializes everything that allocates per-tenant
    /// numbers while still letting ticket inserts take their `KEY SHARE`
    /// foreign key lock.
    pub(crate) async fn lock_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
    ) -> Result<Option<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LOCK_TENANT_SQL)
            .bind(tenant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_tenants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(LIST_TENANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_tenant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        update: TenantUpdate,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(UPDATE_TENANT_SQL)
            .bind(tenant.into_i64())
            .bind(update.name)
            .bind(update.active)
            .fetch_one(&mut **tx)
            .await
    }

    /// Add `delta` to the tenant's active counter count.
    pub(crate) async fn adjust_active_counters(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        delta: i32,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(ADJUST_ACTIVE_COUNTERS_SQL)
            .bind(tenant.into_i64())
            .bind(delta)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(sqlx::Error::RowNotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let active_counters: i32 = row.try_get("active_counters")?;

        let active_counters =
            u32::try_from(active_counters).map_err(|e| sqlx::Error::ColumnDecode {
                index: "active_counters".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: TenantId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            active: row.try_get("active")?,
            active_counters,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
