// SPDX-FileCopyrightText: 2026 Savlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket list filtering.

use savlink_core::{Priority, Ticket, TicketStatus};

/// Priority axis of a [`TicketFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(p) => ticket.priority == *p,
        }
    }
}

/// Status axis of a [`TicketFilter`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TicketStatus),
}

impl StatusFilter {
    fn matches(&self, ticket: &Ticket) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => ticket.status == *s,
        }
    }
}

/// Conjunction of the two filter axes.
///
/// `matches` is a pure predicate and `apply` recomputes the view from the
/// full list every time, so changing a filter never loses tickets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketFilter {
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.priority.matches(ticket) && self.status.matches(ticket)
    }

    /// Filters `tickets` into a fresh list, preserving order.
    pub fn apply(&self, tickets: &[Ticket]) -> Vec<Ticket> {
        tickets.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
