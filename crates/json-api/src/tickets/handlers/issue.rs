//! Issue Ticket Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::{
    tenants::records::TenantId,
    tickets::data::{Allocation, IssueRequest},
};

use crate::{extensions::*, state::State, tickets::errors::into_status_error};

/// Issue Ticket Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssueTicketRequest {
    /// Requester's national identifier
    pub national_id: String,

    /// Requester's reference, e.g. a prescription number
    pub reference: String,

    /// Requesting kiosk
    pub device_id: Option<String>,

    /// Day to issue for (`YYYY-MM-DD`); today when absent. Past days are
    /// only accepted for dry runs.
    pub issue_date: Option<String>,

    /// Only compute the number that would be issued
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AllocationStatus {
    Created,
    Existing,
    Preview,
}

/// Issue Ticket Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssueTicketResponse {
    pub status: AllocationStatus,

    /// Queue number for the day
    pub sequence: u32,

    /// Absent for previews
    pub ticket_id: Option<i64>,

    pub issue_date: String,
}

impl From<Allocation> for IssueTicketResponse {
    fn from(allocation: Allocation) -> Self {
        let status = match &allocation {
            Allocation::Created(_) => AllocationStatus::Created,
            Allocation::Existing(_) => AllocationStatus::Existing,
            Allocation::Preview { .. } => AllocationStatus::Preview,
        };

        IssueTicketResponse {
            status,
            sequence: allocation.sequence(),
            ticket_id: allocation.ticket().map(|ticket| ticket.id.into_i64()),
            issue_date: allocation.issue_date().to_string(),
        }
    }
}

/// Issue Ticket Handler
///
/// Returns the requester's number for the day, creating it on first request.
#[endpoint(
    tags("tickets"),
    summary = "Issue Ticket",
    responses(
        (status_code = StatusCode::CREATED, description = "Ticket created"),
        (status_code = StatusCode::OK, description = "Existing ticket or preview"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid identity or past issue date"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown tenant"),
        (status_code = StatusCode::CONFLICT, description = "Tenant inactive"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Store unavailable"),
    ),
)]
pub(crate) async fn handler(
    tenant: PathParam<i64>,
    json: JsonBody<IssueTicketRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IssueTicketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = json.into_inner();

    let issue_date = body
        .issue_date
        .as_deref()
        .map(str::parse::<Date>)
        .transpose()
        .or_400("could not parse \"issue_date\"")?;

    let allocation = state
        .app
        .tickets
        .issue(IssueRequest {
            tenant: TenantId::from_i64(tenant.into_inner()),
            national_id: body.national_id,
            reference: body.reference,
            issue_date,
            device_id: body.device_id,
            dry_run: body.dry_run,
        })
        .await
        .map_err(into_status_error)?;

    if let Allocation::Created(ticket) = &allocation {
        res.add_header(LOCATION, format!("/queue/tickets/{}", ticket.id), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);
    }

    Ok(Json(allocation.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use queuedesk_app::domain::tickets::{MockTicketsService, TicketsServiceError};

    use crate::test_helpers::{TestApp, make_ticket, sql_error};

    use super::*;

    fn make_service(tickets: MockTicketsService) -> Service {
        TestApp {
            tickets,
            ..TestApp::default()
        }
        .public_service(Router::with_path("tenants/{tenant}/tickets").post(handler))
    }

    #[tokio::test]
    async fn new_identity_returns_201_with_location() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_issue()
            .once()
            .withf(|request| {
                request.tenant == TenantId::from_i64(4)
                    && request.national_id == "900"
                    && request.reference == "P1"
                    && request.issue_date.is_none()
                    && request.device_id.as_deref() == Some("kiosk-1")
                    && !request.dry_run
            })
            .return_once(|_| Ok(Allocation::Created(make_ticket(11, 1))));

        let mut res = TestClient::post("http://example.com/tenants/4/tickets")
            .json(&json!({ "national_id": "900", "reference": "P1", "device_id": "kiosk-1" }))
            .send(&make_service(tickets))
            .await;

        let body: IssueTicketResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/queue/tickets/11"));
        assert_eq!(body.status, AllocationStatus::Created);
        assert_eq!(body.sequence, 1);
        assert_eq!(body.ticket_id, Some(11));
        assert_eq!(body.issue_date, "2026-03-02");

        Ok(())
    }

    #[tokio::test]
    async fn repeated_identity_returns_200_existing() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_issue()
            .once()
            .return_once(|_| Ok(Allocation::Existing(make_ticket(11, 1))));

        let mut res = TestClient::post("http://example.com/tenants/4/tickets")
            .json(&json!({ "national_id": "900", "reference": "P1" }))
            .send(&make_service(tickets))
            .await;

        let body: IssueTicketResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.headers().get("location").is_none(), "existing tickets carry no location");
        assert_eq!(body.status, AllocationStatus::Existing);
        assert_eq!(body.sequence, 1);

        Ok(())
    }

    #[tokio::test]
    async fn dry_run_returns_preview_without_ticket_id() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_issue()
            .once()
            .withf(|request| request.dry_run && request.issue_date == Some(date(2026, 3, 9)))
            .return_once(|_| {
                Ok(Allocation::Preview {
                    issue_date: date(2026, 3, 9),
                    sequence: 4,
                })
            });

        let mut res = TestClient::post("http://example.com/tenants/4/tickets")
            .json(&json!({
                "national_id": "900",
                "reference": "P1",
                "issue_date": "2026-03-09",
                "dry_run": true
            }))
            .send(&make_service(tickets))
            .await;

        let body: IssueTicketResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, AllocationStatus::Preview);
        assert_eq!(body.sequence, 4);
        assert_eq!(body.ticket_id, None);
        assert_eq!(body.issue_date, "2026-03-09");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_issue_date_returns_400() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets.expect_issue().never();

        let res = TestClient::post("http://example.com/tenants/4/tickets")
            .json(&json!({ "national_id": "900", "reference": "P1", "issue_date": "tomorrow" }))
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn service_errors_map_to_statuses() -> TestResult {
        let cases = [
            (TicketsServiceError::InvalidIdentity, StatusCode::BAD_REQUEST),
            (TicketsServiceError::PastIssueDate, StatusCode::BAD_REQUEST),
            (TicketsServiceError::TenantNotFound, StatusCode::NOT_FOUND),
            (TicketsServiceError::TenantInactive, StatusCode::CONFLICT),
            (
                TicketsServiceError::StoreUnavailable(None),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                TicketsServiceError::Sql(sql_error()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let mut tickets = MockTicketsService::new();

            tickets.expect_issue().once().return_once(move |_| Err(error));

            let res = TestClient::post("http://example.com/tenants/4/tickets")
                .json(&json!({ "national_id": "900", "reference": "P1" }))
                .send(&make_service(tickets))
                .await;

            assert_eq!(res.status_code, Some(expected));
        }

        Ok(())
    }
}
