// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregate counters shown in the dashboard header.

use savlink_core::{Priority, Ticket, TicketStatus};

/// Counters over the unfiltered ticket list.
///
/// Recomputed by a full scan on every refresh; the list is small enough
/// that caching would only add staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketStats {
    pub total: usize,
    pub p0: usize,
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub auto_resolved: usize,
    pub escalated: usize,
    pub awaiting_technician: usize,
}

impl TicketStats {
    pub fn compute(tickets: &[Ticket]) -> Self {
        let mut stats = Self {
            total: tickets.len(),
            ..Self::default()
        };
        for ticket in tickets {
            match ticket.priority {
                Priority::P0 => stats.p0 += 1,
                Priority::P1 => stats.p1 += 1,
                Priority::P2 => stats.p2 += 1,
                Priority::P3 => stats.p3 += 1,
            }
            if ticket.auto_resolved {
                stats.auto_resolved += 1;
            }
            match ticket.status {
                TicketStatus::EscalatedToHuman => stats.escalated += 1,
                TicketStatus::AwaitingTechnician => stats.awaiting_technician += 1,
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ticket(priority: Priority, status: TicketStatus, auto_resolved: bool) -> Ticket {
        Ticket {
            ticket_id: "TCK-1".to_string(),
            customer_name: "Jean Morel".to_string(),
            order_number: "CMD-2024-101".to_string(),
            product_name: "table RIVA".to_string(),
            problem_description: "plateau rayé".to_string(),
            priority,
            status,
            tone: None,
            urgency: None,
            auto_resolved,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_list_yields_zeroes() {
        assert_eq!(TicketStats::compute(&[]), TicketStats::default());
    }

    #[test]
    fn counts_every_axis_independently() {
        let tickets = vec![
            ticket(Priority::P0, TicketStatus::EscalatedToHuman, false),
            ticket(Priority::P1, TicketStatus::AwaitingTechnician, false),
            ticket(Priority::P1, TicketStatus::AutoResolved, true),
            ticket(Priority::P2, TicketStatus::Pending, false),
            ticket(Priority::P3, TicketStatus::Unknown, true),
        ];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.p0, 1);
        assert_eq!(stats.p1, 2);
        assert_eq!(stats.p2, 1);
        assert_eq!(stats.p3, 1);
        assert_eq!(stats.auto_resolved, 2);
        assert_eq!(stats.escalated, 1);
        assert_eq!(stats.awaiting_technician, 1);
    }

    #[test]
    fn auto_resolved_counts_the_flag_not_the_status() {
        // A ticket can carry the flag while already escalated; the header
        // counter follows the flag.
        let tickets = vec![ticket(Priority::P2, TicketStatus::EscalatedToHuman, true)];
        let stats = TicketStats::compute(&tickets);
        assert_eq!(stats.auto_resolved, 1);
        assert_eq!(stats.escalated, 1);
    }
}
