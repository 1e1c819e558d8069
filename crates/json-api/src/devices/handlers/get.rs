//! Get Device Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    devices::{errors::into_status_error, models::DeviceResponse},
    extensions::*,
    state::State,
};

/// Get Device Handler
///
/// Returns which tenant a device belongs to and its counter state.
#[endpoint(tags("devices"), summary = "Get Device")]
pub(crate) async fn handler(
    device: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<DeviceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let device = state
        .app
        .devices
        .get_device(&device.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(device.into()))
}
