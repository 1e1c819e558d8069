//! Set Activation Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::{devices::data::ActivationRequest, tenants::records::TenantId};

use crate::{
    devices::{errors::into_status_error, models::DeviceResponse},
    extensions::*,
    state::State,
};

/// Set Activation Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetActivationRequest {
    /// Tenant the device belongs to
    pub tenant_id: i64,

    /// Whether the counter is open
    pub active: bool,
}

/// Set Activation Handler
///
/// Binds a device to a tenant and opens or closes its counter. Repeating the
/// same request changes nothing.
#[endpoint(
    tags("devices"),
    summary = "Set Device Activation",
    responses(
        (status_code = StatusCode::OK, description = "Device state"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown tenant"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Store unavailable"),
    ),
)]
pub(crate) async fn handler(
    device: PathParam<String>,
    json: JsonBody<SetActivationRequest>,
    depot: &mut Depot,
) -> Result<Json<DeviceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let body = json.into_inner();

    let device = state
        .app
        .devices
        .set_activation(ActivationRequest {
            device_id: device.into_inner(),
            tenant: TenantId::from_i64(body.tenant_id),
            active: body.active,
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(device.into()))
}
