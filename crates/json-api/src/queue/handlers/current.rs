//! Current Ticket Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*, queue::errors::into_status_error, state::State,
    tickets::models::TicketResponse,
};

/// Current Ticket Handler
///
/// Returns the oldest pending ticket of the day, or `null` when the queue is
/// empty.
#[endpoint(
    tags("queue"),
    summary = "Current Ticket",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    date: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Option<TicketResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_id_or_401()?;
    let issue_date = date.into_issue_date()?;

    let ticket = state
        .app
        .serving
        .current(tenant, issue_date)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ticket.map(Into::into)))
}
