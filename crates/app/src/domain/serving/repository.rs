//! Serving Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{Postgres, Transaction, query_as};

use crate::domain::{
    tenants::records::TenantId,
    tickets::records::{TicketId, TicketRecord},
};

const CURRENT_TICKET_SQL: &str = include_str!("sql/current_ticket.sql");
const MARK_SERVED_SQL: &str = include_str!("sql/mark_served.sql");
const ADVANCE_NEXT_SQL: &str = include_str!("sql/advance_next.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgServingRepository;

impl PgServingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Oldest pending ticket of the day.
    pub(crate) async fn current_ticket(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        issue_date: Date,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(CURRENT_TICKET_SQL)
            .bind(tenant.into_i64())
            .bind(SqlxDate::from(issue_date))
            .fetch_optional(&mut **tx)
            .await
    }

    /// `pending -> served`; `None` when the ticket is missing or not pending.
    pub(crate) async fn mark_served(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(MARK_SERVED_SQL)
            .bind(ticket.into_i64())
            .bind(tenant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    /// `served -> advanced`; `None` when the ticket is missing or not served.
    pub(crate) async fn advance_next(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<Option<TicketRecord>, sqlx::Error> {
        query_as::<Postgres, TicketRecord>(ADVANCE_NEXT_SQL)
            .bind(ticket.into_i64())
            .bind(tenant.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }
}
