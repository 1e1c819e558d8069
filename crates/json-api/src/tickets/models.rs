//! Ticket Responses

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use queuedesk_app::domain::tickets::records::TicketRecord;

/// Full ticket view for operators.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TicketResponse {
    pub id: i64,
    pub tenant_id: i64,
    pub national_id: String,
    pub reference: String,

    /// Day the sequence belongs to (`YYYY-MM-DD`)
    pub issue_date: String,

    /// Position in the day's queue
    pub sequence: u32,

    pub device_id: Option<String>,

    /// `pending`, `served` or `advanced`
    pub status: String,

    pub created_at: String,
    pub served_at: Option<String>,
    pub called_next_at: Option<String>,
}

impl From<TicketRecord> for TicketResponse {
    fn from(ticket: TicketRecord) -> Self {
        TicketResponse {
            id: ticket.id.into_i64(),
            tenant_id: ticket.tenant_id.into_i64(),
            national_id: ticket.national_id,
            reference: ticket.reference,
            issue_date: ticket.issue_date.to_string(),
            sequence: ticket.sequence,
            device_id: ticket.device_id,
            status: ticket.status.to_string(),
            created_at: ticket.created_at.to_string(),
            served_at: ticket.served_at.as_ref().map(ToString::to_string),
            called_next_at: ticket.called_next_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Ticket view for kiosks and displays; carries no requester identity.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PublicTicketResponse {
    pub id: i64,
    pub issue_date: String,
    pub sequence: u32,
    pub status: String,
    pub created_at: String,
    pub served_at: Option<String>,
}

impl From<TicketRecord> for PublicTicketResponse {
    fn from(ticket: TicketRecord) -> Self {
        PublicTicketResponse {
            id: ticket.id.into_i64(),
            issue_date: ticket.issue_date.to_string(),
            sequence: ticket.sequence,
            status: ticket.status.to_string(),
            created_at: ticket.created_at.to_string(),
            served_at: ticket.served_at.as_ref().map(ToString::to_string),
        }
    }
}
