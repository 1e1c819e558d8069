//! List Devices Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    devices::{errors::into_status_error, models::DeviceResponse},
    extensions::*,
    state::State,
};

/// List Devices Handler
///
/// Returns the operator's devices ordered by counter index.
#[endpoint(
    tags("devices"),
    summary = "List Devices",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<DeviceResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;

    let devices = state
        .app
        .devices
        .list_devices(tenant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(devices.into_iter().map(Into::into).collect()))
}
