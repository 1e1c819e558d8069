//! Test Helpers

use crate::{
    domain::{
        devices::data::ActivationRequest,
        tenants::records::TenantId,
        tickets::{
            TicketsService, TicketsServiceError,
            data::IssueRequest,
            records::TicketRecord,
        },
    },
    test::TestContext,
};

/// Request for today's ticket with no device attached.
pub(crate) fn issue_request(tenant: TenantId, national_id: &str, reference: &str) -> IssueRequest {
    IssueRequest {
        tenant,
        national_id: national_id.to_string(),
        reference: reference.to_string(),
        issue_date: None,
        device_id: None,
        dry_run: false,
    }
}

/// Issue a ticket for the context's default tenant and return the record.
pub(crate) async fn issue_ticket(
    ctx: &TestContext,
    national_id: &str,
    reference: &str,
) -> Result<TicketRecord, TicketsServiceError> {
    let allocation = ctx
        .tickets
        .issue(issue_request(ctx.tenant_id, national_id, reference))
        .await?;

    allocation.ticket().cloned().ok_or(TicketsServiceError::NotFound)
}

pub(crate) fn activation(device_id: &str, tenant: TenantId, active: bool) -> ActivationRequest {
    ActivationRequest {
        device_id: device_id.to_string(),
        tenant,
        active,
    }
}
