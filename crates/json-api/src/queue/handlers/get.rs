//! Get Ticket Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use queuedesk_app::domain::tickets::records::TicketId;

use crate::{
    extensions::*,
    state::State,
    tickets::{errors::into_status_error, models::TicketResponse},
};

/// Get Ticket Handler
#[endpoint(
    tags("queue"),
    summary = "Get Ticket",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    ticket: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<TicketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;

    let ticket = state
        .app
        .tickets
        .get_ticket(tenant, TicketId::from_i64(ticket.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ticket.into()))
}
