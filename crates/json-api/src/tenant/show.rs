//! Show Tenant Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use queuedesk_app::domain::tenants::records::TenantId;

use crate::{
    extensions::*,
    state::State,
    tenant::{errors::into_status_error, models::PublicTenantResponse},
};

/// Show Tenant Handler
///
/// Public lookup of one tenant's name, active flag and open counters.
#[endpoint(tags("tenants"), summary = "Show Tenant")]
pub(crate) async fn handler(
    tenant: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<PublicTenantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenant = state
        .app
        .tenants
        .get_tenant(TenantId::from_i64(tenant.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenant.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use queuedesk_app::domain::tenants::{MockTenantsService, TenantsServiceError};

    use crate::test_helpers::{TestApp, make_tenant, sql_error};

    use super::*;

    fn make_service(tenants: MockTenantsService) -> Service {
        TestApp {
            tenants,
            ..TestApp::default()
        }
        .public_service(Router::with_path("tenants/{tenant}").get(handler))
    }

    #[tokio::test]
    async fn returns_the_public_view_of_a_tenant() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_get_tenant()
            .once()
            .withf(|tenant| *tenant == TenantId::from_i64(3))
            .return_once(|_| Ok(make_tenant(3, "Corner Clinic", false, 1)));

        let mut res = TestClient::get("http://example.com/tenants/3")
            .send(&make_service(tenants))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            serde_json::json!({
                "id": 3,
                "name": "Corner Clinic",
                "active": false,
                "active_counters": 1
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_tenant_returns_404() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_get_tenant()
            .once()
            .return_once(|_| Err(TenantsServiceError::NotFound));

        let res = TestClient::get("http://example.com/tenants/99")
            .send(&make_service(tenants))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_id_returns_400() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants.expect_get_tenant().never();

        let res = TestClient::get("http://example.com/tenants/acme")
            .send(&make_service(tenants))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_500() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_get_tenant()
            .once()
            .return_once(|_| Err(TenantsServiceError::Sql(sql_error())));

        let res = TestClient::get("http://example.com/tenants/3")
            .send(&make_service(tenants))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
