//! Queue Metrics Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::{analytics::models::QueueMetrics, tenants::records::TenantId};

use crate::{
    analytics::errors::into_status_error, extensions::*, state::State,
    tickets::models::PublicTicketResponse,
};

/// Queue Metrics Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QueueMetricsResponse {
    /// Ticket being called
    pub current_unserved: Option<PublicTicketResponse>,

    /// Ticket waiting behind the current one
    pub next_unserved: Option<PublicTicketResponse>,

    pub last_served: Option<PublicTicketResponse>,

    /// Mean seconds from issue to serve
    pub avg_serve_latency_seconds: Option<f64>,

    /// Mean seconds from serve to calling the next ticket
    pub avg_counter_gap_seconds: Option<f64>,
}

impl From<QueueMetrics> for QueueMetricsResponse {
    fn from(metrics: QueueMetrics) -> Self {
        QueueMetricsResponse {
            current_unserved: metrics.current_unserved.map(Into::into),
            next_unserved: metrics.next_unserved.map(Into::into),
            last_served: metrics.last_served.map(Into::into),
            avg_serve_latency_seconds: metrics.avg_serve_latency,
            avg_counter_gap_seconds: metrics.avg_counter_gap,
        }
    }
}

/// Queue Metrics Handler
///
/// Returns live figures for a tenant's public display.
#[endpoint(tags("analytics"), summary = "Queue Metrics")]
pub(crate) async fn handler(
    tenant: PathParam<i64>,
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<QueueMetricsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let issue_date = date.into_issue_date()?;

    let metrics = state
        .app
        .analytics
        .metrics(TenantId::from_i64(tenant.into_inner()), issue_date)
        .await
        .map_err(into_status_error)?;

    Ok(Json(metrics.into()))
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use queuedesk_app::domain::analytics::{AnalyticsServiceError, MockAnalyticsService};

    use crate::test_helpers::{TestApp, make_ticket};

    use super::*;

    fn make_service(analytics: MockAnalyticsService) -> Service {
        TestApp {
            analytics,
            ..TestApp::default()
        }
        .public_service(Router::with_path("tenants/{tenant}/metrics").get(handler))
    }

    #[tokio::test]
    async fn returns_current_and_next_tickets() -> TestResult {
        let mut analytics = MockAnalyticsService::new();

        analytics
            .expect_metrics()
            .once()
            .withf(|tenant, issue_date| {
                *tenant == TenantId::from_i64(3) && *issue_date == Some(date(2026, 3, 2))
            })
            .return_once(|_, _| {
                Ok(QueueMetrics {
                    current_unserved: Some(make_ticket(2, 2)),
                    next_unserved: Some(make_ticket(3, 3)),
                    last_served: Some(make_ticket(1, 1)),
                    avg_serve_latency: Some(90.0),
                    avg_counter_gap: None,
                })
            });

        let mut res = TestClient::get("http://example.com/tenants/3/metrics?date=2026-03-02")
            .send(&make_service(analytics))
            .await;

        let body: QueueMetricsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.current_unserved.map(|ticket| ticket.sequence), Some(2));
        assert_eq!(body.next_unserved.map(|ticket| ticket.sequence), Some(3));
        assert_eq!(body.last_served.map(|ticket| ticket.sequence), Some(1));
        assert_eq!(body.avg_serve_latency_seconds, Some(90.0));
        assert_eq!(body.avg_counter_gap_seconds, None);

        Ok(())
    }

    #[tokio::test]
    async fn empty_day_is_not_an_error() -> TestResult {
        let mut analytics = MockAnalyticsService::new();

        analytics.expect_metrics().once().return_once(|_, _| {
            Ok(QueueMetrics {
                current_unserved: None,
                next_unserved: None,
                last_served: None,
                avg_serve_latency: None,
                avg_counter_gap: None,
            })
        });

        let mut res = TestClient::get("http://example.com/tenants/3/metrics")
            .send(&make_service(analytics))
            .await;

        let body: QueueMetricsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.current_unserved.is_none());
        assert!(body.avg_serve_latency_seconds.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tenant_returns_404() -> TestResult {
        let mut analytics = MockAnalyticsService::new();

        analytics
            .expect_metrics()
            .once()
            .return_once(|_, _| Err(AnalyticsServiceError::TenantNotFound));

        let res = TestClient::get("http://example.com/tenants/404/metrics")
            .send(&make_service(analytics))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
