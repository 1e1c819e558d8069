//! Tickets service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tracing::debug;

use crate::{
    clock::QueueClock,
    database::Db,
    domain::{
        tenants::{records::TenantId, repository::PgTenantsRepository},
        tickets::{
            data::{Allocation, IssueRequest, RequesterIdentity},
            errors::TicketsServiceError,
            records::{TicketId, TicketRecord},
            repository::PgTicketsRepository,
        },
    },
    retry::retry_on_conflict,
};

#[derive(Debug, Clone)]
pub struct PgTicketsService {
    db: Db,
    clock: QueueClock,
    tenants: PgTenantsRepository,
    repository: PgTicketsRepository,
}

impl PgTicketsService {
    #[must_use]
    pub fn new(db: Db, clock: QueueClock) -> Self {
        Self {
            db,
            clock,
            tenants: PgTenantsRepository::new(),
            repository: PgTicketsRepository::new(),
        }
    }

    async fn issue_once(
        &self,
        tenant: TenantId,
        issue_date: Date,
        identity: &RequesterIdentity,
        device_id: Option<&str>,
    ) -> Result<Allocation, TicketsServiceError> {
        let mut tx = self.db.begin().await?;

        if let Some(existing) = self
            .repository
            .find_by_identity(&mut tx, tenant, issue_date, identity)
            .await?
        {
            tx.commit().await?;

            return Ok(Allocation::Existing(existing));
        }

        let tenant_record = self
            .tenants
            .lock_tenant(&mut tx, tenant)
            .await?
            .ok_or(TicketsServiceError::TenantNotFound)?;

        // A concurrent request for the same identity may have committed while
        // we waited on the lock.
        if let Some(existing) = self
            .repository
            .find_by_identity(&mut tx, tenant, issue_date, identity)
            .await?
        {
            tx.commit().await?;

            return Ok(Allocation::Existing(existing));
        }

        if !tenant_record.active {
            return Err(TicketsServiceError::TenantInactive);
        }

        let inserted = self
            .repository
            .insert_next_ticket(&mut tx, tenant, issue_date, identity, device_id)
            .await?;

        let allocation = match inserted {
            Some(ticket) => Allocation::Created(ticket),
            None => self
                .repository
                .find_by_identity(&mut tx, tenant, issue_date, identity)
                .await?
                .map(Allocation::Existing)
                .ok_or(TicketsServiceError::Conflict)?,
        };

        tx.commit().await?;

        Ok(allocation)
    }

    async fn preview(
        &self,
        tenant: TenantId,
        issue_date: Date,
        identity: &RequesterIdentity,
    ) -> Result<Allocation, TicketsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let tenant_record = self
            .tenants
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(TicketsServiceError::TenantNotFound)?;

        let allocation = match self
            .repository
            .find_by_identity(&mut tx, tenant, issue_date, identity)
            .await?
        {
            Some(existing) => Allocation::Existing(existing),
            None if !tenant_record.active => return Err(TicketsServiceError::TenantInactive),
            None => Allocation::Preview {
                issue_date,
                sequence: self
                    .repository
                    .next_sequence(&mut tx, tenant, issue_date)
                    .await?,
            },
        };

        tx.commit().await?;

        Ok(allocation)
    }
}

#[async_trait]
impl TicketsService for PgTicketsService {
    async fn issue(&self, request: IssueRequest) -> Result<Allocation, TicketsServiceError> {
        let identity = RequesterIdentity::new(&request.national_id, &request.reference)?;
        let issue_date = self.clock.resolve(request.issue_date);
        let tenant = request.tenant;

        let device_id = request
            .device_id
            .as_deref()
            .map(str::trim)
            .filter(|device| !device.is_empty());

        if request.dry_run {
            return self.preview(tenant, issue_date, &identity).await;
        }

        if issue_date < self.clock.today() {
            return Err(TicketsServiceError::PastIssueDate);
        }

        let identity = &identity;

        let allocation = retry_on_conflict(self.db.retry_policy(), "issue_ticket", move || {
            self.issue_once(tenant, issue_date, identity, device_id)
        })
        .await?;

        debug!(
            tenant = %tenant,
            %issue_date,
            sequence = allocation.sequence(),
            created = matches!(allocation, Allocation::Created(_)),
            "ticket allocated"
        );

        Ok(allocation)
    }

    async fn last_issued(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<Option<TicketRecord>, TicketsServiceError> {
        let issue_date = self.clock.resolve(issue_date);

        let mut tx = self.db.begin_read_only().await?;

        self.tenants
            .get_tenant(&mut tx, tenant)
            .await?
            .ok_or(TicketsServiceError::TenantNotFound)?;

        let ticket = self
            .repository
            .last_issued(&mut tx, tenant, issue_date)
            .await?;

        tx.commit().await?;

        Ok(ticket)
    }

    async fn get_ticket(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<TicketRecord, TicketsServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let record = self
            .repository
            .get_ticket(&mut tx, tenant, ticket)
            .await?
            .ok_or(TicketsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait TicketsService: Send + Sync {
    /// Issue, reuse, or preview a ticket number for a requester.
    async fn issue(&self, request: IssueRequest) -> Result<Allocation, TicketsServiceError>;

    /// Highest-numbered ticket of the day, if any.
    async fn last_issued(
        &self,
        tenant: TenantId,
        issue_date: Option<Date>,
    ) -> Result<Option<TicketRecord>, TicketsServiceError>;

    /// Fetch one of the tenant's tickets.
    async fn get_ticket(
        &self,
        tenant: TenantId,
        ticket: TicketId,
    ) -> Result<TicketRecord, TicketsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use testresult::TestResult;

    use crate::{
        domain::{
            tenants::{TenantsService, data::TenantUpdate},
            tickets::records::TicketStatus,
        },
        test::{TestContext, helpers::issue_request},
    };

    use super::*;

    #[tokio::test]
    async fn sequential_identities_get_sequential_numbers_and_repeats_are_reused() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;
        let second = ctx.tickets.issue(issue_request(ctx.tenant_id, "901", "P2")).await?;
        let repeat = ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;

        assert!(matches!(first, Allocation::Created(_)), "got {first:?}");
        assert!(matches!(second, Allocation::Created(_)), "got {second:?}");
        assert!(matches!(repeat, Allocation::Existing(_)), "got {repeat:?}");

        assert_eq!(first.sequence(), 1);
        assert_eq!(second.sequence(), 2);
        assert_eq!(repeat.sequence(), 1);
        assert_eq!(repeat.ticket().map(|t| t.id), first.ticket().map(|t| t.id));

        Ok(())
    }

    #[tokio::test]
    async fn new_ticket_is_pending_and_keeps_its_device() -> TestResult {
        let ctx = TestContext::new().await;

        let mut request = issue_request(ctx.tenant_id, "900", "P1");
        request.device_id = Some(" kiosk-1 ".to_string());

        let allocation = ctx.tickets.issue(request).await?;
        let ticket = allocation.ticket().ok_or("expected a ticket")?;

        assert_eq!(ticket.status, TicketStatus::Pending);
        assert!(!ticket.served());
        assert_eq!(ticket.device_id.as_deref(), Some("kiosk-1"));
        assert!(ticket.served_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn blank_device_is_stored_as_absent() -> TestResult {
        let ctx = TestContext::new().await;

        let mut request = issue_request(ctx.tenant_id, "900", "P1");
        request.device_id = Some("   ".to_string());

        let allocation = ctx.tickets.issue(request).await?;

        assert_eq!(allocation.ticket().and_then(|t| t.device_id.clone()), None);

        Ok(())
    }

    #[tokio::test]
    async fn identity_is_trimmed_before_deduplication() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;
        let padded = ctx
            .tickets
            .issue(issue_request(ctx.tenant_id, "  900 ", " P1"))
            .await?;

        assert!(matches!(padded, Allocation::Existing(_)), "got {padded:?}");
        assert_eq!(padded.sequence(), first.sequence());

        Ok(())
    }

    #[tokio::test]
    async fn blank_identity_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.tickets.issue(issue_request(ctx.tenant_id, " ", "P1")).await;

        assert!(
            matches!(result, Err(TicketsServiceError::InvalidIdentity)),
            "expected InvalidIdentity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tenant_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .tickets
            .issue(issue_request(TenantId::from_i64(987_654), "900", "P1"))
            .await;

        assert!(
            matches!(result, Err(TicketsServiceError::TenantNotFound)),
            "expected TenantNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_tenant_cannot_issue_new_tickets() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.tenants
            .update_tenant(
                ctx.tenant_id,
                TenantUpdate {
                    name: None,
                    active: Some(false),
                },
            )
            .await?;

        let result = ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await;

        assert!(
            matches!(result, Err(TicketsServiceError::TenantInactive)),
            "expected TenantInactive, got {result:?}"
        );

        let preview = ctx
            .tickets
            .issue(IssueRequest {
                dry_run: true,
                ..issue_request(ctx.tenant_id, "900", "P1")
            })
            .await;

        assert!(
            matches!(preview, Err(TicketsServiceError::TenantInactive)),
            "expected TenantInactive for a preview, got {preview:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn numbering_restarts_each_day_and_per_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_tenant("Other").await;

        let tomorrow = QueueClock::utc().today().tomorrow()?;

        let mut first_day = issue_request(ctx.tenant_id, "900", "P1");
        first_day.issue_date = Some(tomorrow);

        let mut second_day = issue_request(ctx.tenant_id, "900", "P1");
        second_day.issue_date = Some(tomorrow.tomorrow()?);

        let mut elsewhere = issue_request(other, "901", "P2");
        elsewhere.issue_date = Some(tomorrow);

        assert_eq!(ctx.tickets.issue(first_day).await?.sequence(), 1);
        assert_eq!(ctx.tickets.issue(second_day).await?.sequence(), 1);
        assert_eq!(ctx.tickets.issue(elsewhere).await?.sequence(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn past_days_can_be_previewed_but_not_issued() -> TestResult {
        let ctx = TestContext::new().await;
        let yesterday = QueueClock::utc().today().yesterday()?;

        let mut backfill = issue_request(ctx.tenant_id, "900", "P1");
        backfill.issue_date = Some(yesterday);

        let result = ctx.tickets.issue(backfill.clone()).await;

        assert!(
            matches!(result, Err(TicketsServiceError::PastIssueDate)),
            "expected PastIssueDate, got {result:?}"
        );

        backfill.dry_run = true;

        let preview = ctx.tickets.issue(backfill).await?;

        assert!(
            matches!(preview, Allocation::Preview { sequence: 1, issue_date } if issue_date == yesterday),
            "got {preview:?}"
        );
        assert!(ctx.tickets.last_issued(ctx.tenant_id, Some(yesterday)).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn dry_run_previews_without_creating() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;

        let mut preview = issue_request(ctx.tenant_id, "901", "P2");
        preview.dry_run = true;

        let allocation = ctx.tickets.issue(preview.clone()).await?;
        let again = ctx.tickets.issue(preview).await?;

        assert!(
            matches!(allocation, Allocation::Preview { sequence: 2, .. }),
            "got {allocation:?}"
        );
        assert_eq!(again, allocation);

        let last = ctx.tickets.last_issued(ctx.tenant_id, None).await?;

        assert_eq!(last.map(|ticket| ticket.sequence), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn dry_run_for_known_identity_returns_existing_number() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;

        let mut preview = issue_request(ctx.tenant_id, "900", "P1");
        preview.dry_run = true;

        let allocation = ctx.tickets.issue(preview).await?;

        assert!(matches!(allocation, Allocation::Existing(_)), "got {allocation:?}");
        assert_eq!(allocation.sequence(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_duplicate_requests_share_one_ticket() -> TestResult {
        let ctx = TestContext::new().await;

        let mut handles = Vec::new();

        for _ in 0..50 {
            let tickets = ctx.tickets.clone();
            let request = issue_request(ctx.tenant_id, "900", "P1");

            handles.push(tokio::spawn(async move { tickets.issue(request).await }));
        }

        let mut sequences = BTreeSet::new();
        let mut created = 0;

        for handle in handles {
            let allocation = handle.await??;

            if matches!(allocation, Allocation::Created(_)) {
                created += 1;
            }

            sequences.insert(allocation.sequence());
        }

        assert_eq!(created, 1, "exactly one request should create the ticket");
        assert_eq!(sequences, BTreeSet::from([1]));

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_distinct_identities_get_gapless_numbers() -> TestResult {
        let ctx = TestContext::new().await;

        let mut handles = Vec::new();

        for index in 0..25 {
            let tickets = ctx.tickets.clone();
            let request = issue_request(ctx.tenant_id, &format!("id-{index}"), "P");

            handles.push(tokio::spawn(async move { tickets.issue(request).await }));
        }

        let mut sequences = BTreeSet::new();

        for handle in handles {
            sequences.insert(handle.await??.sequence());
        }

        assert_eq!(sequences, (1..=25).collect::<BTreeSet<u32>>());

        Ok(())
    }

    #[tokio::test]
    async fn last_issued_tracks_the_highest_sequence() -> TestResult {
        let ctx = TestContext::new().await;

        assert!(ctx.tickets.last_issued(ctx.tenant_id, None).await?.is_none());

        ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;
        ctx.tickets.issue(issue_request(ctx.tenant_id, "901", "P2")).await?;

        let last = ctx.tickets.last_issued(ctx.tenant_id, None).await?;

        assert_eq!(last.map(|ticket| ticket.sequence), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn get_ticket_is_scoped_to_the_tenant() -> TestResult {
        let ctx = TestContext::new().await;
        let other = ctx.create_tenant("Other").await;

        let allocation = ctx.tickets.issue(issue_request(ctx.tenant_id, "900", "P1")).await?;
        let ticket = allocation.ticket().ok_or("expected a ticket")?;

        let found = ctx.tickets.get_ticket(ctx.tenant_id, ticket.id).await?;
        let foreign = ctx.tickets.get_ticket(other, ticket.id).await;

        assert_eq!(found.id, ticket.id);
        assert!(
            matches!(foreign, Err(TicketsServiceError::NotFound)),
            "expected NotFound, got {foreign:?}"
        );

        Ok(())
    }
}
