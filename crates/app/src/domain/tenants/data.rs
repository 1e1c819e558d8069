//! Tenant Data

/// New Tenant Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTenant {
    /// Display name, e.g. the pharmacy's trading name.
    pub name: String,

    /// Whether the tenant accepts tickets straight away.
    pub active: bool,
}

/// Partial tenant update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenantUpdate {
    /// Replacement display name.
    pub name: Option<String>,

    /// Replacement active flag.
    pub active: Option<bool>,
}

impl TenantUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.active.is_none()
    }
}
