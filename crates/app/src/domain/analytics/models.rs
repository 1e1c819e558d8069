//! Queue Metrics

use jiff::Timestamp;

use crate::domain::tickets::records::{TicketRecord, TicketStatus};

/// Live figures for a tenant's public display.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueMetrics {
    /// Oldest pending ticket.
    pub current_unserved: Option<TicketRecord>,

    /// Pending ticket right behind the current one.
    pub next_unserved: Option<TicketRecord>,

    /// Most recent ticket that left the pending state.
    pub last_served: Option<TicketRecord>,

    /// Mean seconds between issue and serve.
    pub avg_serve_latency: Option<f64>,

    /// Mean seconds between serve and calling the next ticket.
    pub avg_counter_gap: Option<f64>,
}

impl QueueMetrics {
    /// Derive metrics from one day's tickets in queue order.
    #[must_use]
    pub fn from_tickets(tickets: &[TicketRecord]) -> Self {
        let mut pending = tickets
            .iter()
            .filter(|ticket| ticket.status == TicketStatus::Pending);

        let current_unserved = pending.next().cloned();
        let next_unserved = pending.next().cloned();

        let last_served = tickets.iter().rev().find(|ticket| ticket.served()).cloned();

        let avg_serve_latency = mean_seconds(
            tickets
                .iter()
                .filter(|ticket| ticket.served())
                .filter_map(|ticket| Some((ticket.created_at, ticket.served_at?))),
        );

        let avg_counter_gap = mean_seconds(
            tickets
                .iter()
                .filter_map(|ticket| Some((ticket.served_at?, ticket.called_next_at?))),
        );

        Self {
            current_unserved,
            next_unserved,
            last_served,
            avg_serve_latency,
            avg_counter_gap,
        }
    }
}

fn mean_seconds(spans: impl Iterator<Item = (Timestamp, Timestamp)>) -> Option<f64> {
    let (total, count) = spans.fold((0.0_f64, 0_u32), |(total, count), (from, to)| {
        (total + to.duration_since(from).as_secs_f64(), count + 1)
    });

    (count > 0).then(|| total / f64::from(count))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, civil::date};

    use crate::domain::{tenants::records::TenantId, tickets::records::TicketId};

    use super::*;

    fn at(seconds: i64) -> Timestamp {
        Timestamp::UNIX_EPOCH + SignedDuration::from_secs(seconds)
    }

    fn ticket(
        sequence: u32,
        status: TicketStatus,
        created: i64,
        served: Option<i64>,
        called_next: Option<i64>,
    ) -> TicketRecord {
        TicketRecord {
            id: TicketId::from_i64(i64::from(sequence)),
            tenant_id: TenantId::from_i64(1),
            national_id: format!("n-{sequence}"),
            reference: "P".to_string(),
            issue_date: date(2026, 3, 2),
            sequence,
            device_id: None,
            status,
            created_at: at(created),
            served_at: served.map(at),
            called_next_at: called_next.map(at),
        }
    }

    #[test]
    fn empty_day_has_no_metrics() {
        let metrics = QueueMetrics::from_tickets(&[]);

        assert!(metrics.current_unserved.is_none());
        assert!(metrics.next_unserved.is_none());
        assert!(metrics.last_served.is_none());
        assert!(metrics.avg_serve_latency.is_none());
        assert!(metrics.avg_counter_gap.is_none());
    }

    #[test]
    fn pending_tickets_fill_current_and_next_in_order() {
        let tickets = [
            ticket(1, TicketStatus::Advanced, 0, Some(60), Some(90)),
            ticket(2, TicketStatus::Pending, 10, None, None),
            ticket(3, TicketStatus::Pending, 20, None, None),
            ticket(4, TicketStatus::Pending, 30, None, None),
        ];

        let metrics = QueueMetrics::from_tickets(&tickets);

        assert_eq!(metrics.current_unserved.map(|t| t.sequence), Some(2));
        assert_eq!(metrics.next_unserved.map(|t| t.sequence), Some(3));
        assert_eq!(metrics.last_served.map(|t| t.sequence), Some(1));
    }

    #[test]
    fn last_served_is_the_latest_non_pending_in_queue_order() {
        let tickets = [
            ticket(1, TicketStatus::Advanced, 0, Some(10), Some(20)),
            ticket(2, TicketStatus::Pending, 5, None, None),
            ticket(3, TicketStatus::Served, 6, Some(30), None),
        ];

        let metrics = QueueMetrics::from_tickets(&tickets);

        assert_eq!(metrics.last_served.map(|t| t.sequence), Some(3));
        assert_eq!(metrics.current_unserved.map(|t| t.sequence), Some(2));
        assert!(metrics.next_unserved.is_none());
    }

    #[test]
    fn averages_use_only_tickets_with_both_timestamps() {
        let tickets = [
            ticket(1, TicketStatus::Advanced, 0, Some(60), Some(90)),
            ticket(2, TicketStatus::Served, 0, Some(120), None),
            ticket(3, TicketStatus::Pending, 0, None, None),
        ];

        let metrics = QueueMetrics::from_tickets(&tickets);

        assert_eq!(metrics.avg_serve_latency, Some(90.0));
        assert_eq!(metrics.avg_counter_gap, Some(30.0));
    }

    #[test]
    fn no_advanced_tickets_means_no_counter_gap() {
        let tickets = [ticket(1, TicketStatus::Served, 0, Some(45), None)];

        let metrics = QueueMetrics::from_tickets(&tickets);

        assert_eq!(metrics.avg_serve_latency, Some(45.0));
        assert!(metrics.avg_counter_gap.is_none());
    }
}
