//! Tickets Repository

use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    tenants::records::TenantId,
    tickets::{
        data::RequesterIdentity,
        records::{TicketId, TicketRecord, TicketStatus},
    },
};

const FIND_BY_IDENTITY_SQL: &str = include_str!("sql/find_by_identity.sql");
const NEXT_SEQUENCE_SQL: &str = include_str!("sql/next_sequence.sql");
const INSERT_TICKET_SQL: &str = include_str!("sql/insert_ticket.sql");
const LAST_ISSUED_SQL: &str = include_str!("sql/last_issued.sql");
const GET_TICKET_SQL: &str = include_str!("sql/get_ticket.sql");
const LIST_TICKETS_FOR_DAY_SQL: &str = include_str!("sql/list_tickets_for_day.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTicketsRepository;

impl PgTicketsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_identity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
        identity: &RequesterIdentity,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(FIND_BY_IDENTITY_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .bind(identity.national_id())
            .bind(identity.reference())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn next_sequence(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
    ) -> Result<u32, sqlx::Error> {
        let next: i32 = query_scalar(NEXT_SEQUENCE_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .fetch_one(&mut **tx)
            .await?;

        decode_sequence(next)
    }

    /// Insert the next ticket of the day.
    ///
    /// `max + 1` is computed by the insert itself; callers must hold the
    /// tenant lock. Returns `None` when a uniqueness constraint swallowed the
    /// row.
    pub(crate) async fn insert_next_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
        identity: &RequesterIdentity,
        device_id: Option<&str>,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(INSERT_TICKET_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .bind(identity.national_id())
            .bind(identity.reference())
            .bind(device_id)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn last_issued(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LAST_ISSUED_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn get_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(GET_TICKET_SQL)
            .bind(ticket.into_i64())
            .bind(tenant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Every ticket of the day in queue order.
    pub(crate) async fn list_for_day(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
    ) -> Result<Vec<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(LIST_TICKETS_FOR_DAY_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .fetch_all(&mut **tx)
            .await
    }
}

fn decode_sequence(sequence: i32) -> Result<u32, sqlx::Error> {
    u32::try_from(sequence).map_err(|e| sqlx::Error::ColumnDecode {
        index: "sequence".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for TicketRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status = row
            .try_get::<String, _>("status")?
            .parse::<TicketStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: TicketId::from_i64(row.try_get("id")?),
            tenant_id: TenantId::from_i64(row.try_get("tenant_id")?),
            national_id: row.try_get("national_id")?,
            reference: row.try_get("reference")?,
            issue_date: row.try_get::<SqlxDate, _>("issue_date")?.to_jiff(),
            sequence: decode_sequence(row.try_get("sequence")?)?,
            device_id: row.try_get("device_id")?,
            status,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            served_at: row
                .try_get::<Option<SqlxTimestamp>, _>("served_at")?
                .map(SqlxTimestamp::to_jiff),
            called_next_at: row
                .try_get::<Option<SqlxTimestamp>, _>("called_next_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
