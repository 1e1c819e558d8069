//! Device Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::devices::records::DeviceRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeviceResponse {
    pub device_id: String,
    pub tenant_id: i64,

    /// Stable "Counter #N" label; `0` until first activation
    pub counter_index: u32,

    pub active: bool,
}

impl From<DeviceRecord> for DeviceResponse {
    fn from(device: DeviceRecord) -> Self {
        DeviceResponse {
            device_id: device.device_id,
            tenant_id: device.tenant_id.into_i64(),
            counter_index: device.counter_index,
            active: device.active,
        }
    }
}
