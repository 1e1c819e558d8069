//! Mark Served Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use queuedesk_app::domain::tickets::records::TicketId;

use crate::{
    extensions::*, queue::errors::into_status_error, state::State,
    tickets::models::TicketResponse,
};

/// Mark Served Handler
///
/// Confirms a pending ticket as served. Serving twice is rejected and keeps
/// the original timestamp.
#[endpoint(
    tags("queue"),
    summary = "Mark Ticket Served",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Ticket served"),
        (status_code = StatusCode::NOT_FOUND, description = "Unknown ticket"),
        (status_code = StatusCode::CONFLICT, description = "Ticket already served"),
    ),
)]
pub(crate) async fn handler(
    ticket: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<TicketResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;

    let ticket = state
        .app
        .serving
        .mark_served(tenant, TicketId::from_i64(ticket.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(ticket.into()))
}
