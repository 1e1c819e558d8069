//! Serving service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::info;

use crate::{
    clock::QueueClock,
    database::Db,
    domain::{
        serving::{errors::ServingServiceError, repository::PgServingRepository},
        tenants::{records::TenantId, repository::PgTenantsRepository},
        tickets::{
            records::{TicketId, TicketRecord, TicketStatus},
            repository::PgTicketsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgServingService {
    db: Db,
    clock: QueueClock,
    tenants: PgTenantsRepository,
    tickets: PgTicketsRepository,
    repository: PgServingRepository,
}

impl PgServingService {
    #[must_use]
    pub fn new(db: Db, clock: QueueClock) -> Self {
        Self {
            db,
            clock,
            tenants: PgTenantsRepository::new(),
            tickets: PgTicketsRepository::new(),
            repository: PgServingRepository::new(),
        }
    }
}

#[async_trait]
impl ServingService for PgServingService {
    async fn current(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<Option<TicketRecord>, ServingServiceError> {
        let issue_date = self.clock.resolve(issue_date);

        let mut tx = self.db.begin_read_only().await?;

        self.tenants
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(ServingServiceError::TenantNotFound)?;

        let current = self
            .repository
            .current_ticket(&mut tx, tenant, issue_date)
            .await?;

        tx.commit().await?;

        Ok(current)
    }

    async fn mark_served(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<TicketRecord, ServingServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(served) = self.repository.mark_served(&mut tx, tenant, ticket).await? else {
            return match self.tickets.get_ticket(&mut tx, tenant, ticket).await? {
                Some(_) => Err(ServingServiceError::AlreadyServed),
                None => Err(ServingServiceError::NotFound),
            };
        };

        tx.commit().await?;

        info!(tenant = %tenant, ticket = %ticket, sequence = served.sequence, "ticket served");

        Ok(served)
    }

    async fn advance_next(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<Option<TicketRecord>, ServingServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(advanced) = self.repository.advance_next(&mut tx, tenant, ticket).await? else {
            return match self.tickets.get_ticket(&mut tx, tenant, ticket).await? {
                Some(existing) if existing.status == TicketStatus::Pending => {
                    Err(ServingServiceError::NotServed)
                }
                Some(_) => Err(ServingServiceError::AlreadyAdvanced),
                None => Err(ServingServiceError::NotFound),
            };
        };

        let next = self
            .repository
            .current_ticket(&mut tx, tenant, advanced.issue_date)
            .await?;

        tx.commit().await?;

        info!(
            tenant = %tenant,
            ticket = %ticket,
            next = ?next.as_ref().map(|ticket| ticket.sequence),
            "queue advanced"
        );

        Ok(next)
    }
}

#[automock]
#[async_trait]
/// Operator-facing queue cursor.
pub trait ServingService: Send + Sync {
    /// Oldest pending ticket of the day, if any.
    async fn current(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<Option<TicketRecord>, ServingServiceError>;

    /// Confirm a pending ticket as served.
    async fn mark_served(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<TicketRecord, ServingServiceError>;

    /// Record the call-next moment for a served ticket and return the new
    /// current ticket.
    async fn advance_next(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<Option<TicketRecord>, ServingServiceError>;
}
