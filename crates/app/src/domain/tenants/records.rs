//! Tenant Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// Tenant ID
pub type TenantId = TypedId<TenantRecord>;

/// Tenant Record
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRecord {
    /// Store-assigned identifier.
    pub id: TenantId,

    /// Human-readable tenant name.
    pub name: String,

    /// Whether new tickets may be issued.
    pub active: bool,

    /// Number of devices currently active for this tenant.
    pub active_counters: u32,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
