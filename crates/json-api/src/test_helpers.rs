//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};

use queuedesk_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        analytics::MockAnalyticsService,
        devices::{MockDevicesService, records::DeviceRecord},
        serving::MockServingService,
        tenants::{
            MockTenantsService,
            records::{TenantId, TenantRecord},
        },
        tickets::{
            MockTicketsService,
            records::{TicketId, TicketRecord, TicketStatus},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_TENANT_ID: TenantId = TenantId::from_i64(1);

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant_id(TEST_TENANT_ID);
    ctrl.call_next(req, depot, res).await;
}

/// Mocked service set. A mock without expectations fails on any call.
#[derive(Default)]
pub(crate) struct TestApp {
    pub(crate) tenants: MockTenantsService,
    pub(crate) tickets: MockTicketsService,
    pub(crate) serving: MockServingService,
    pub(crate) devices: MockDevicesService,
    pub(crate) analytics: MockAnalyticsService,
    pub(crate) auth: MockAuthService,
}

impl TestApp {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::new(AppContext {
            tenants: Arc::new(self.tenants),
            tickets: Arc::new(self.tickets),
            serving: Arc::new(self.serving),
            devices: Arc::new(self.devices),
            analytics: Arc::new(self.analytics),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` without authentication.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as an operator already resolved to [`TEST_TENANT_ID`].
    pub(crate) fn operator_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_tenant)
                .push(route),
        )
    }
}

pub(crate) fn make_tenant(id: i64, name: &str, active: bool, active_counters: u32) -> TenantRecord {
    TenantRecord {
        id: TenantId::from_i64(id),
        name: name.to_string(),
        active,
        active_counters,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_ticket(id: i64, sequence: u32) -> TicketRecord {
    TicketRecord {
        id: TicketId::from_i64(id),
        tenant_id: TEST_TENANT_ID,
        national_id: format!("90{sequence}"),
        reference: format!("P{sequence}"),
        issue_date: date(2026, 3, 2),
        sequence,
        device_id: None,
        status: TicketStatus::Pending,
        created_at: Timestamp::UNIX_EPOCH,
        served_at: None,
        called_next_at: None,
    }
}

pub(crate) fn make_device(device_id: &str, counter_index: u32, active: bool) -> DeviceRecord {
    DeviceRecord {
        device_id: device_id.to_string(),
        tenant_id: TEST_TENANT_ID,
        counter_index,
        active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A storage failure that is neither contention nor unavailability.
pub(crate) fn sql_error() -> sqlx::Error {
    sqlx::Error::Protocol("unexpected message".to_string())
}
