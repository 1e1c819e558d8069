//! Activation state transitions.
//!
//! Deciding what a `SetActivation` call must do is independent of the store:
//! given the device's current binding (if any) and the desired tenant/state,
//! produce the index rule, the row write, and the per-tenant counter deltas.

use crate::domain::{devices::records::DeviceRecord, tenants::records::TenantId};

/// How the counter index changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum IndexRule {
    /// Keep the stored index.
    Keep(u32),

    /// Take `max(counter_index) + 1` under the target tenant.
    AssignNext,

    /// Not assigned.
    Unassigned,
}

/// Which row write the transition needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowWrite {
    Insert,
    Update,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Transition {
    pub(super) index: IndexRule,
    pub(super) write: RowWrite,
    pub(super) decrement: Option<TenantId>,
    pub(super) increment: Option<TenantId>,
}

pub(super) fn plan(current: Option<&DeviceRecord>, tenant: TenantId, active: bool) -> Transition {
    let Some(current) = current else {
        return Transition {
            index: if active {
                IndexRule::AssignNext
            } else {
                IndexRule::Unassigned
            },
            write: RowWrite::Insert,
            decrement: None,
            increment: active.then_some(tenant),
        };
    };

    if current.tenant_id != tenant {
        return Transition {
            index: if active {
                IndexRule::AssignNext
            } else {
                IndexRule::Unassigned
            },
            write: RowWrite::Update,
            decrement: current.active.then_some(current.tenant_id),
            increment: active.then_some(tenant),
        };
    }

    match (current.active, active) {
        (false, true) => Transition {
            index: if current.counter_index > 0 {
                IndexRule::Keep(current.counter_index)
            } else {
                IndexRule::AssignNext
            },
            write: RowWrite::Update,
            decrement: None,
            increment: Some(tenant),
        },
        (true, false) => Transition {
            index: IndexRule::Keep(current.counter_index),
            write: RowWrite::Update,
            decrement: Some(tenant),
            increment: None,
        },
        (true, true) | (false, false) => Transition {
            index: IndexRule::Keep(current.counter_index),
            write: RowWrite::Nothing,
            decrement: None,
            increment: None,
        },
    }
}
