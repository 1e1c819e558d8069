//! Device Records

use jiff::Timestamp;

use crate::domain::tenants::records::TenantId;

/// Device Activation Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Client-supplied device fingerprint; unique system-wide.
    pub device_id: String,

    /// Tenant the device currently belongs to.
    pub tenant_id: TenantId,

    /// "Counter #N" label within the tenant; `0` until first activation.
    pub counter_index: u32,

    pub active: bool,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}
