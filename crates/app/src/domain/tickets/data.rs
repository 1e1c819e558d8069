//! Ticket Data

use jiff::civil::Date;

use crate::domain::{
    tenants::records::TenantId,
    tickets::{errors::TicketsServiceError, records::TicketRecord},
};

/// Ticket issue request as received from a kiosk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    /// Tenant whose queue the ticket joins.
    pub tenant: TenantId,

    /// Requester's national identifier.
    pub national_id: String,

    /// Requester's reference.
    pub reference: String,

    /// Day to issue for; today when absent.
    pub issue_date: Option<Date>,

    /// Requesting device; blank values are treated as absent.
    pub device_id: Option<String>,

    /// Compute the number without creating anything.
    pub dry_run: bool,
}

/// Trimmed, non-empty requester identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterIdentity {
    national_id: String,
    reference: String,
}

impl RequesterIdentity {
    /// Validate and normalise a raw identity pair.
    ///
    /// # Errors
    ///
    /// Returns [`TicketsServiceError::InvalidIdentity`] when either part is
    /// blank after trimming.
    pub fn new(national_id: &str, reference: &str) -> Result<Self, TicketsServiceError> {
        let national_id = national_id.trim();
        let reference = reference.trim();

        if national_id.is_empty() || reference.is_empty() {
            return Err(TicketsServiceError::InvalidIdentity);
        }

        Ok(Self {
            national_id: national_id.to_string(),
            reference: reference.to_string(),
        })
    }

    #[must_use]
    pub fn national_id(&self) -> &str {
        &self.national_id
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

/// Outcome of an issue request.
#[derive(Debug, Clone, PartialEq)]
pub enum Allocation {
    /// A new ticket was created.
    Created(TicketRecord),

    /// The identity already held a ticket for the day.
    Existing(TicketRecord),

    /// Dry run: the number the next new ticket would receive.
    Preview {
        /// Day the preview applies to.
        issue_date: Date,

        /// Would-be sequence; not reserved.
        sequence: u32,
    },
}

impl Allocation {
    #[must_use]
    pub fn sequence(&self) -> u32 {
        match self {
            Self::Created(ticket) | Self::Existing(ticket) => ticket.sequence,
            Self::Preview { sequence, .. } => *sequence,
        }
    }

    #[must_use]
    pub fn issue_date(&self) -> Date {
        match self {
            Self::Created(ticket) | Self::Existing(ticket) => ticket.issue_date,
            Self::Preview { issue_date, .. } => *issue_date,
        }
    }

    #[must_use]
    pub fn ticket(&self) -> Option<&TicketRecord> {
        match self {
            Self::Created(ticket) | Self::Existing(ticket) => Some(ticket),
            Self::Preview { .. } => None,
        }
    }
}
