//! Advance Next Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use queuedesk_app::domain::tickets::records::TicketId;

use crate::{
    extensions::*, queue::errors::into_status_error, state::State,
    tickets::models::TicketResponse,
};

/// Advance Next Handler
///
/// Records that the operator moved past a served ticket and returns the new
/// current ticket, or `null` when nobody is waiting.
#[endpoint(
    tags("queue"),
    summary = "Call Next Ticket",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Next current ticket"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
        (status_code = StatusCode::CONFLICT, description = "Ticket not served or already advanced"),
    ),
)]
pub(crate) async fn handler(
    ticket: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<Option<TicketResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;

    let next = state
        .app
        .serving
        .advance_next(tenant, TicketId::from_i64(ticket.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(next.map(Into::into)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use queuedesk_app::domain::serving::{MockServingService, ServingServiceError};

    use crate::test_helpers::{TEST_TENANT_ID, TestApp, make_ticket};

    use super::*;

    fn make_service(serving: MockServingService) -> Service {
        TestApp {
            serving,
            ..TestApp::default()
        }
        .operator_service(Router::with_path("queue/tickets/{ticket}/next").put(handler))
    }

    #[tokio::test]
    async fn returns_the_next_pending_ticket() -> TestResult {
        let mut serving = MockServingService::new();

        serving
            .expect_advance_next()
            .once()
            .withf(|tenant, ticket| *tenant == TEST_TENANT_ID && *ticket == TicketId::from_i64(8))
            .return_once(|_, _| Ok(Some(make_ticket(9, 2))));

        let mut res = TestClient::put("http://example.com/queue/tickets/8/next")
            .send(&make_service(serving))
            .await;

        let body: Option<TicketResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.map(|ticket| ticket.id), Some(9));

        Ok(())
    }

    #[tokio::test]
    async fn drained_queue_returns_null() -> TestResult {
        let mut serving = MockServingService::new();

        serving
            .expect_advance_next()
            .once()
            .return_once(|_, _| Ok(None));

        let mut res = TestClient::put("http://example.com/queue/tickets/8/next")
            .send(&make_service(serving))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "null");

        Ok(())
    }

    #[tokio::test]
    async fn lifecycle_violations_return_409() -> TestResult {
        for error in [ServingServiceError::NotServed, ServingServiceError::AlreadyAdvanced] {
            let mut serving = MockServingService::new();

            serving
                .expect_advance_next()
                .once()
                .return_once(move |_, _| Err(error));

            let res = TestClient::put("http://example.com/queue/tickets/8/next")
                .send(&make_service(serving))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        }

        Ok(())
    }
}
