//! List Tenants Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    tenant::{errors::into_status_error, models::PublicTenantResponse},
};

/// List Tenants Handler
///
/// Public tenant directory used when setting up a device.
#[endpoint(tags("tenants"), summary = "List Tenants")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<PublicTenantResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tenants = state
        .app
        .tenants
        .list_tenants()
        .await
        .map_err(into_status_error)?;

    Ok(Json(tenants.into_iter().map(Into::into).collect()))
}
