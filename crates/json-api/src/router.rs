//! App Router

use salvo::Router;

use crate::{analytics, auth, devices, queue, tenant, tickets};

/// Kiosk, display and device routes plus the bearer-protected operator routes.
pub(crate) fn app_router() -> Router {
    Router::new().push(public_router()).push(operator_router())
}

fn public_router() -> Router {
    Router::new()
        .push(
            Router::with_path("tenants")
                .get(tenant::index::handler)
                .push(
                    Router::with_path("{tenant}")
                        .get(tenant::show::handler)
                        .push(
                            Router::with_path("tickets")
                                .post(tickets::issue::handler)
                                .push(Router::with_path("last").get(tickets::last::handler)),
                        )
                        .push(Router::with_path("metrics").get(analytics::metrics::handler)),
                ),
        )
        .push(
            Router::with_path("devices/{device}")
                .get(devices::get::handler)
                .push(Router::with_path("activation").put(devices::activate::handler)),
        )
}

fn operator_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("tenant").get(tenant::get::handler))
        .push(Router::with_path("devices").get(devices::index::handler))
        .push(
            Router::with_path("queue")
                .push(Router::with_path("current").get(queue::current::handler))
                .push(
                    Router::with_path("tickets/{ticket}")
                        .get(queue::get::handler)
                        .push(Router::with_path("served").put(queue::served::handler))
                        .push(Router::with_path("next").put(queue::next::handler)),
                ),
        )
}
