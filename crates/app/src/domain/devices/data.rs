//! Device Data

use crate::domain::tenants::records::TenantId;

/// Desired activation state reported by a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRequest {
    /// Device fingerprint.
    pub device_id: String,

    /// Tenant the device should belong to.
    pub tenant: TenantId,

    /// Whether the device should count as an open counter.
    pub active: bool,
}
