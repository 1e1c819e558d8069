//! Analytics service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;

use crate::{
    clock::QueueClock,
    database::Db,
    domain::{
        analytics::{errors::AnalyticsServiceError, models::QueueMetrics},
        tenants::{records::TenantId, repository::PgTenantsRepository},
        tickets::repository::PgTicketsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAnalyticsService {
    db: Db,
    clock: QueueClock,
    tenants: PgTenantsRepository,
    tickets: PgTicketsRepository,
}

impl PgAnalyticsService {
    #[must_use]
    pub fn new(db: Db, clock: QueueClock) -> Self {
        Self {
            db,
            clock,
            tenants: PgTenantsRepository::new(),
            tickets: PgTicketsRepository::new(),
        }
    }
}

#[async_trait]
impl AnalyticsService for PgAnalyticsService {
    async fn metrics(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<QueueMetrics, AnalyticsServiceError> {
        let issue_date = self.clock.resolve(issue_date);

        let mut tx = self.db.begin_read_only().await?;

        self.tenants
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(AnalyticsServiceError::TenantNotFound)?;

        let tickets = self.tickets.list_for_day(&mut tx, tenant, issue_date).await?;

        tx.commit().await?;

        Ok(QueueMetrics::from_tickets(&tickets))
    }
}

#[automock]
#[async_trait]
pub trait AnalyticsService: Send + Sync {
    /// Derive a tenant's queue metrics for a day, today by default.
    async fn metrics(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<QueueMetrics, AnalyticsServiceError>;
}
