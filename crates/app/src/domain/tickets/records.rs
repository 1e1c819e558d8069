//! Ticket Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::{domain::tenants::records::TenantId, ids::TypedId};

/// Ticket ID
pub type TicketId = TypedId<TicketRecord>;

/// Where a ticket is in its serve/advance lifecycle.
///
/// Transitions only ever move forward: `Pending -> Served -> Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    /// Issued and waiting to be called.
    Pending,

    /// Confirmed as served by an operator.
    Served,

    /// Served, and the operator has moved on to the next ticket.
    Advanced,
}

impl TicketStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Served => "served",
            Self::Advanced => "advanced",
        }
    }

    #[must_use]
    pub const fn is_served(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown ticket status {0:?}")]
pub struct UnknownTicketStatus(String);

impl FromStr for TicketStatus {
    type Err = UnknownTicketStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "served" => Ok(Self::Served),
            "advanced" => Ok(Self::Advanced),
            other => Err(UnknownTicketStatus(other.to_string())),
        }
    }
}

/// Ticket Record
#[derive(Debug, Clone, PartialEq)]
pub struct TicketRecord {
    /// Store-assigned identifier.
    pub id: TicketId,

    /// Owning tenant.
    pub tenant_id: TenantId,

    /// Requester's national identifier.
    pub national_id: String,

    /// Requester's reference, e.g. a prescription number.
    pub reference: String,

    /// Day the sequence belongs to.
    pub issue_date: Date,

    /// Position in the day's queue, starting at 1.
    pub sequence: u32,

    /// Kiosk or device that requested the ticket.
    pub device_id: Option<String>,

    /// Lifecycle state.
    pub status: TicketStatus,

    /// Issue timestamp.
    pub created_at: Timestamp,

    /// When an operator marked the ticket served.
    pub served_at: Option<Timestamp>,

    /// When an operator moved past this ticket.
    pub called_next_at: Option<Timestamp>,
}

impl TicketRecord {
    #[must_use]
    pub fn served(&self) -> bool {
        self.status.is_served()
    }
}
