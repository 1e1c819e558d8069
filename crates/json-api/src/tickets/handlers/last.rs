//! Last Issued Ticket Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use queuedesk_app::domain::tenants::records::TenantId;

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, models::PublicTicketResponse},
};

/// Last Issued Ticket Handler
///
/// Returns the highest-numbered ticket of the day, or `null`.
#[endpoint(tags("tickets"), summary = "Last Issued Ticket")]
pub(crate) async fn handler(
    tenant: PathParam<i64>,
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Option<PublicTicketResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let issue_date = date.into_issue_date()?;

    let ticket = state
        .app
        .tickets
        .last_issued(TenantId::from_i64(tenant.into_inner()), issue_date)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ticket.map(Into::into)))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use queuedesk_app::domain::tickets::{MockTicketsService, TicketsServiceError};

    use crate::test_helpers::{TestApp, make_ticket};

    use super::*;

    fn make_service(tickets: MockTicketsService) -> Service {
        TestApp {
            tickets,
            ..TestApp::default()
        }
        .public_service(Router::with_path("tenants/{tenant}/tickets/last").get(handler))
    }

    #[tokio::test]
    async fn returns_last_ticket_without_identity() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_last_issued()
            .once()
            .withf(|tenant, issue_date| {
                *tenant == TenantId::from_i64(4) && *issue_date == Some(date(2026, 3, 2))
            })
            .return_once(|_, _| Ok(Some(make_ticket(12, 3))));

        let mut res = TestClient::get("http://example.com/tenants/4/tickets/last?date=2026-03-02")
            .send(&make_service(tickets))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["sequence"], 3);
        assert_eq!(body["status"], "pending");
        assert!(body.get("national_id").is_none(), "public view must hide identity");
        assert!(body.get("reference").is_none(), "public view must hide identity");

        Ok(())
    }

    #[tokio::test]
    async fn empty_day_returns_null() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_last_issued()
            .once()
            .withf(|_, issue_date| issue_date.is_none())
            .return_once(|_, _| Ok(None));

        let mut res = TestClient::get("http://example.com/tenants/4/tickets/last")
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "null");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tenant_returns_404() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets
            .expect_last_issued()
            .once()
            .return_once(|_, _| Err(TicketsServiceError::TenantNotFound));

        let res = TestClient::get("http://example.com/tenants/99/tickets/last")
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_date_returns_400() -> TestResult {
        let mut tickets = MockTicketsService::new();

        tickets.expect_last_issued().never();

        let res = TestClient::get("http://example.com/tenants/4/tickets/last?date=03-02-2026")
            .send(&make_service(tickets))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
